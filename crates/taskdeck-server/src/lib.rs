pub mod routes;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;

use std::sync::Arc;

use anyhow::Result;
use taskdeck_service::MemoryService;
use tokio::net::TcpListener;

pub async fn serve(listener: TcpListener, service: Arc<MemoryService>) -> Result<()> {
    let app = routes::build_router(service);
    axum::serve(listener, app).await?;
    Ok(())
}
