//! Test harness for integration testing.
//!
//! Each test gets its own in-memory SQLite database (migrated) and a scratch
//! upload directory. External services are mocks from
//! `kernel::test_dependencies`.

use anyhow::{Context, Result};
use axum::Router;
use gifting_core::common::connect_in_memory;
use gifting_core::kernel::{ServerDeps, TestDependencies};
use gifting_core::server::build_app;
use sqlx::SqlitePool;
use tempfile::TempDir;
use test_context::AsyncTestContext;

/// Test harness that manages test infrastructure.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let app = ctx.app();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: SqlitePool,
    /// Scratch directory standing in for UPLOAD_DIR
    pub upload_dir: TempDir,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let db_pool = connect_in_memory()
            .await
            .context("Failed to open test database")?;
        let upload_dir = tempfile::tempdir().context("Failed to create upload dir")?;

        Ok(Self {
            db_pool,
            upload_dir,
        })
    }

    /// ServerDeps wired to the given mocks.
    pub fn deps(&self, mocks: TestDependencies) -> ServerDeps {
        mocks.into_server_deps(self.db_pool.clone(), self.upload_dir.path().to_path_buf())
    }

    /// Router with default mocks.
    pub fn app(&self) -> Router {
        self.app_with(TestDependencies::new())
    }

    pub fn app_with(&self, mocks: TestDependencies) -> Router {
        build_app(self.deps(mocks))
    }
}
