use std::ops::Deref;
use std::sync::Arc;

use derive_new::new;

use crate::config::{Config, SiteConfig};
use crate::content::PostLibrary;
use crate::counter::ViewCounter;
use crate::database::Database;

#[derive(Clone, new)]
pub struct App {
    pub counter: ViewCounter,
    pub library: Arc<PostLibrary>,
    pub site: SiteConfig,
}

impl Deref for App {
    type Target = ViewCounter;

    fn deref(&self) -> &Self::Target {
        &self.counter
    }
}

pub fn create_app(config: &Config, database: Database, library: PostLibrary) -> App {
    let counter = ViewCounter::new(Arc::new(database), config.mode);

    App::new(counter, Arc::new(library), config.site.clone())
}
