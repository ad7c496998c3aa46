use std::sync::Arc;
use std::time::Duration;

use mongodb::{options::ClientOptions, Client, Database};
use tracing::info;

use crate::api::router::AppState;
use crate::application::{
    ports::{CustomerRepository, OrderRepository},
    use_cases::{
        DeleteCustomerUseCase, GetCustomerUseCase, ListCustomersUseCase, UpdateCustomerUseCase,
    },
};
use crate::config::{Config, StoreBackend};
use crate::domain::filtering::InjectionDetector;
use crate::infrastructure::persistence::{
    InMemoryStore, MongoCustomerRepository, MongoOrderRepository,
};

type BuildError = Box<dyn std::error::Error + Send + Sync>;

/// Connection attempts before giving up on the document store
const CONNECT_RETRIES: u32 = 3;

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    database: Option<Database>,
    customer_repo: Option<Arc<dyn CustomerRepository>>,
    order_repo: Option<Arc<dyn OrderRepository>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            database: None,
            customer_repo: None,
            order_repo: None,
        }
    }

    /// Connect to MongoDB with retry logic
    pub async fn with_database(mut self) -> Result<Self, BuildError> {
        let mut options = ClientOptions::parse(&self.config.mongodb_uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.max_pool_size = Some(self.config.mongodb_max_pool_size);
        options.connect_timeout = Some(Duration::from_secs(
            self.config.mongodb_connect_timeout_secs,
        ));
        options.server_selection_timeout = Some(Duration::from_secs(
            self.config.mongodb_connect_timeout_secs,
        ));

        let client = Client::with_options(options)?;
        let database = client.database(&self.config.mongodb_database);

        // The driver connects lazily; ping until the server answers
        let mut retries = CONNECT_RETRIES;
        let mut delay = Duration::from_secs(1);
        loop {
            match database.run_command(bson::doc! { "ping": 1 }, None).await {
                Ok(_) => break,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    tracing::warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay,
                        retries,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2; // Exponential backoff
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        }

        info!(
            database = %self.config.mongodb_database,
            max_pool_size = self.config.mongodb_max_pool_size,
            "Connected to MongoDB"
        );

        self.database = Some(database);
        Ok(self)
    }

    /// Initialize infrastructure layer (repositories)
    pub async fn with_infrastructure(mut self) -> Result<Self, BuildError> {
        match self.config.store_backend {
            StoreBackend::MongoDb => {
                if self.database.is_none() {
                    self = self.with_database().await?;
                }
                let database = self
                    .database
                    .clone()
                    .ok_or("Database not initialized")?;

                self.customer_repo = Some(Arc::new(MongoCustomerRepository::new(
                    database.clone(),
                    &self.config.customers_collection,
                )));
                self.order_repo = Some(Arc::new(MongoOrderRepository::new(
                    database.collection(&self.config.orders_collection),
                )));
            }
            StoreBackend::Memory => {
                self = self.with_store(InMemoryStore::new());
            }
        }

        info!(backend = ?self.config.store_backend, "Infrastructure layer initialized");
        Ok(self)
    }

    /// Use an existing in-memory store for both collections
    pub fn with_store(mut self, store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        self.customer_repo = Some(Arc::clone(&store) as Arc<dyn CustomerRepository>);
        self.order_repo = Some(store as Arc<dyn OrderRepository>);
        self
    }

    /// Use explicit repository implementations
    pub fn with_repositories(
        mut self,
        customer_repo: Arc<dyn CustomerRepository>,
        order_repo: Arc<dyn OrderRepository>,
    ) -> Self {
        self.customer_repo = Some(customer_repo);
        self.order_repo = Some(order_repo);
        self
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, BuildError> {
        let customer_repo = self
            .customer_repo
            .ok_or("Customer repository not initialized")?;
        let order_repo = self.order_repo.ok_or("Order repository not initialized")?;

        let detector = InjectionDetector::new(self.config.injection_max_depth);

        let list_customers_use_case = Arc::new(ListCustomersUseCase::new(
            Arc::clone(&customer_repo),
            Arc::clone(&order_repo),
            detector,
        ));
        let get_customer_use_case = Arc::new(GetCustomerUseCase::new(Arc::clone(&customer_repo)));
        let update_customer_use_case = Arc::new(UpdateCustomerUseCase::new(
            Arc::clone(&customer_repo),
            detector,
        ));
        let delete_customer_use_case =
            Arc::new(DeleteCustomerUseCase::new(Arc::clone(&customer_repo)));

        info!("Application layer initialized");

        Ok(AppState {
            customer_store: customer_repo,
            list_customers_use_case,
            get_customer_use_case,
            update_customer_use_case,
            delete_customer_use_case,
            config: self.config,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
