use dotenvy::dotenv;

use afterthoughts::config::Config;
use afterthoughts::error::ApplicationError;
use afterthoughts::{api, content, database, logger};

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    dotenv().ok();

    let config = Config::from_env()?;

    let _guard = logger::init(&config)?;

    let database = database::connect(&config.surreal).await?;
    let library = content::load(&config.content)?;

    let app = api::create_app(&config, database, library);
    api::serve(config.host, app).await
}
