use crate::GatewayConfig;
use crate::interfaces::web::server::create_server;

pub struct RunApplicationUseCase {
    config: GatewayConfig,
}

impl RunApplicationUseCase {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    pub async fn execute(self) -> anyhow::Result<()> {
        // Delegate to the web server module
        create_server(self.config).await
    }
}
