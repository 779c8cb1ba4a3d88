use std::sync::atomic::{AtomicU32, Ordering};
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::{ContainerAsync, GenericImage, ImageExt, runners::AsyncRunner};
use tokio::sync::OnceCell;

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

pub fn unique_id(prefix: &str) -> String {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", prefix, id)
}

/// Table name unique within the test process, valid for DynamoDB.
pub fn unique_table_name() -> String {
    unique_id("concordances-test")
}

/// A concept UUID unique within the test process.
pub fn unique_concept_id() -> String {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("00000000-0000-4000-8000-{:012x}", id)
}

pub const DYNAMODB_LOCAL_REGION: &str = "eu-west-1";

pub struct DynamoDbLocalFixture {
    #[allow(dead_code)]
    container: ContainerAsync<GenericImage>,
    endpoint: String
}

impl DynamoDbLocalFixture {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn region(&self) -> &str {
        DYNAMODB_LOCAL_REGION
    }
}

static DYNAMODB_LOCAL: OnceCell<Option<DynamoDbLocalFixture>> = OnceCell::const_new();

pub async fn dynamodb_local() -> Option<&'static DynamoDbLocalFixture> {
    DYNAMODB_LOCAL
        .get_or_init(|| async {
            let container_result = GenericImage::new("amazon/dynamodb-local", "latest")
                .with_exposed_port(ContainerPort::Tcp(8000))
                .with_wait_for(WaitFor::message_on_stdout("Initializing DynamoDB Local"))
                .with_cmd(vec!["-jar", "DynamoDBLocal.jar", "-inMemory", "-sharedDb"])
                .with_startup_timeout(std::time::Duration::from_secs(60))
                .start()
                .await;

            match container_result {
                Ok(container) => {
                    let port = container.get_host_port_ipv4(8000).await.ok()?;
                    let endpoint = format!("http://localhost:{}", port);
                    tracing::info!("DynamoDB Local fixture started on port {}", port);
                    Some(DynamoDbLocalFixture {
                        container,
                        endpoint
                    })
                }
                Err(e) => {
                    tracing::warn!("Failed to start DynamoDB Local container: {:?}", e);
                    None
                }
            }
        })
        .await
        .as_ref()
}
