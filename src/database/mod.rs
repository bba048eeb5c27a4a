use mongodb::{Client, Collection, Database};
use std::error::Error;

/// Collection names inside the volunteer database.
pub const POSTS: &str = "volunteer";
pub const SIGNUPS: &str = "volunteerRequest";
pub const USERS: &str = "user";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool sizing: the whole app shares this one client
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("volunteerDB");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { client, db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes backing the hot query paths.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        // Posts are listed sorted by deadline and filtered by organizer
        let posts = self.db.collection::<mongodb::bson::Document>(POSTS);

        let deadline_index = IndexModel::builder().keys(doc! { "deadline": 1 }).build();
        match posts.create_index(deadline_index).await {
            Ok(_) => log::info!("   ✅ Index created: {}(deadline)", POSTS),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let organizer_index = IndexModel::builder()
            .keys(doc! { "organizer_email": 1 })
            .build();
        match posts.create_index(organizer_index).await {
            Ok(_) => log::info!("   ✅ Index created: {}(organizer_email)", POSTS),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // Signups are listed per user email
        let signups = self.db.collection::<mongodb::bson::Document>(SIGNUPS);

        let email_index = IndexModel::builder().keys(doc! { "userEmail": 1 }).build();
        match signups.create_index(email_index).await {
            Ok(_) => log::info!("   ✅ Index created: {}(userEmail)", SIGNUPS),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
