// system-tests/tests/suites/live.rs
// ============================================================================
// Module: Live Suite
// Description: Round-trip against the deployed story service.
// Purpose: Confirm the hermetic stub still matches the real deployment.
// Dependencies: system-tests helpers, storyspoiler-client, storyspoiler-core
// ============================================================================

//! Live coverage behind the `live-tests` feature: one create-and-delete
//! round trip against the deployed service, leaving no story behind. Target
//! and credentials come from `STORYSPOILER_SYSTEM_TEST_*` variables, falling
//! back to the public demo deployment.

use std::time::Duration;

use helpers::artifacts::TestReporter;
use storyspoiler_client::ApiClient;
use storyspoiler_client::Credentials;
use storyspoiler_client::authenticate;
use storyspoiler_core::StoryApi;
use storyspoiler_core::StoryDraft;
use storyspoiler_core::StoryId;
use storyspoiler_core::StoryRecord;
use system_tests::config::SystemTestConfig;
use url::Url;

use crate::helpers;

const DEFAULT_BASE_URL: &str = "https://d3s5nxhwblsjbi.cloudfront.net";
const DEFAULT_USERNAME: &str = "reex";
const DEFAULT_PASSWORD: &str = "qwerty123";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::test(flavor = "multi_thread")]
async fn live_create_and_delete_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("live_create_and_delete_round_trip")?;
    let config = SystemTestConfig::load()?;
    let base_url = Url::parse(config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
    let credentials = Credentials::new(
        config.username.as_deref().unwrap_or(DEFAULT_USERNAME),
        config.password.as_deref().unwrap_or(DEFAULT_PASSWORD),
    )?;
    let timeout = config.timeout.unwrap_or(DEFAULT_TIMEOUT);

    let session = authenticate(&base_url, &credentials, timeout).await?;
    let client = ApiClient::new(base_url, session, timeout)?;

    let draft = StoryDraft::new("New Story", "Test story description", "");
    let created = client.create_story(&draft).await?;
    if created.status != 201 {
        return Err(format!("live create returned status {}", created.status).into());
    }
    let record: StoryRecord = created.json()?;
    let Some(id) = record.id else {
        return Err("live create response carried no identifier".into());
    };

    let deleted = client.delete_story(&id).await?;
    if deleted.status != 200 {
        return Err(format!("live delete returned status {}", deleted.status).into());
    }
    if !deleted.body.contains("Deleted successfully!") {
        return Err(format!("live delete body missing message: {}", deleted.body).into());
    }

    let missing = client.delete_story(&StoryId::new("42442")).await?;
    if missing.status != 400 {
        return Err(format!("repeat delete returned status {}", missing.status).into());
    }

    reporter.artifacts().write_json("transcript.json", &client.transcript())?;
    reporter.finish(
        "pass",
        vec![format!("live round trip completed for story {id}")],
        vec!["summary.json".to_string(), "summary.md".to_string(), "transcript.json".to_string()],
    )?;
    drop(reporter);
    Ok(())
}
