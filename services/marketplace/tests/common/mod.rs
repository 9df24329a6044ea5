//! 测试共用的内存后端
//!
//! 用 HashMap 模拟六张表，仓储与工作单元都直接读写同一份共享存储。
//! 命令处理器先校验后写入，所以空操作的提交与回滚不破坏断言。

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use mande_common::UserId;
use mande_errors::AppResult;
use tokio::sync::Mutex;

use marketplace::domain::entities::{Customer, Job, Listing, ServiceOrder, UserProfile, Worker};
use marketplace::domain::repositories::{
    CustomerRepository, JobRepository, ListingRepository, OrderRepository, UserProfileRepository,
    WorkerRepository,
};
use marketplace::domain::unit_of_work::{UnitOfWork, UnitOfWorkFactory};
use marketplace::domain::value_objects::{CustomerId, JobId, ListingId, OrderId, WorkerId};

/// 六张表的内存影子
#[derive(Default)]
pub struct MarketplaceStore {
    pub users: Mutex<HashMap<UserId, UserProfile>>,
    pub workers: Mutex<HashMap<WorkerId, Worker>>,
    pub customers: Mutex<HashMap<CustomerId, Customer>>,
    pub jobs: Mutex<HashMap<JobId, Job>>,
    pub listings: Mutex<HashMap<ListingId, Listing>>,
    pub orders: Mutex<HashMap<OrderId, ServiceOrder>>,
}

pub struct InMemoryUserProfileRepository {
    store: Arc<MarketplaceStore>,
}

impl InMemoryUserProfileRepository {
    pub fn new(store: Arc<MarketplaceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserProfileRepository for InMemoryUserProfileRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<UserProfile>> {
        Ok(self.store.users.lock().await.get(id).cloned())
    }
}

pub struct InMemoryWorkerRepository {
    store: Arc<MarketplaceStore>,
}

impl InMemoryWorkerRepository {
    pub fn new(store: Arc<MarketplaceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WorkerRepository for InMemoryWorkerRepository {
    async fn find_by_id(&self, id: &WorkerId) -> AppResult<Option<Worker>> {
        Ok(self.store.workers.lock().await.get(id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AppResult<Option<Worker>> {
        Ok(self
            .store
            .workers
            .lock()
            .await
            .values()
            .find(|worker| worker.user_id() == user_id)
            .cloned())
    }

    async fn lock_by_id(&self, id: &WorkerId) -> AppResult<Option<Worker>> {
        // 内存实现没有行锁，等同普通查找
        self.find_by_id(id).await
    }

    async fn update(&self, worker: &Worker) -> AppResult<()> {
        self.store
            .workers
            .lock()
            .await
            .insert(*worker.id(), worker.clone());
        Ok(())
    }
}

pub struct InMemoryCustomerRepository {
    store: Arc<MarketplaceStore>,
}

impl InMemoryCustomerRepository {
    pub fn new(store: Arc<MarketplaceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> AppResult<Option<Customer>> {
        Ok(self.store.customers.lock().await.get(id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AppResult<Option<Customer>> {
        Ok(self
            .store
            .customers
            .lock()
            .await
            .values()
            .find(|customer| customer.user_id() == user_id)
            .cloned())
    }
}

pub struct InMemoryJobRepository {
    store: Arc<MarketplaceStore>,
}

impl InMemoryJobRepository {
    pub fn new(store: Arc<MarketplaceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn find_all(&self) -> AppResult<Vec<Job>> {
        let mut jobs: Vec<Job> = self.store.jobs.lock().await.values().cloned().collect();
        // 与 SQL 实现一致，按名称排序
        jobs.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(jobs)
    }

    async fn find_by_id(&self, id: &JobId) -> AppResult<Option<Job>> {
        Ok(self.store.jobs.lock().await.get(id).cloned())
    }
}

pub struct InMemoryListingRepository {
    store: Arc<MarketplaceStore>,
}

impl InMemoryListingRepository {
    pub fn new(store: Arc<MarketplaceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn find_by_id(&self, id: &ListingId) -> AppResult<Option<Listing>> {
        Ok(self.store.listings.lock().await.get(id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Listing>> {
        let mut listings: Vec<Listing> =
            self.store.listings.lock().await.values().cloned().collect();
        listings.sort_by_key(|listing| listing.created_at());
        Ok(listings)
    }

    async fn find_by_worker_and_job(
        &self,
        worker_id: &WorkerId,
        job_id: &JobId,
    ) -> AppResult<Option<Listing>> {
        Ok(self
            .store
            .listings
            .lock()
            .await
            .values()
            .find(|listing| listing.worker_id() == worker_id && listing.job_id() == job_id)
            .cloned())
    }

    async fn save(&self, listing: &Listing) -> AppResult<()> {
        self.store
            .listings
            .lock()
            .await
            .insert(*listing.id(), listing.clone());
        Ok(())
    }

    async fn delete(&self, id: &ListingId) -> AppResult<()> {
        self.store.listings.lock().await.remove(id);
        Ok(())
    }
}

pub struct InMemoryOrderRepository {
    store: Arc<MarketplaceStore>,
}

impl InMemoryOrderRepository {
    pub fn new(store: Arc<MarketplaceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_id(&self, id: &OrderId) -> AppResult<Option<ServiceOrder>> {
        Ok(self.store.orders.lock().await.get(id).cloned())
    }

    async fn find_by_customer(&self, customer_id: &CustomerId) -> AppResult<Vec<ServiceOrder>> {
        let mut orders: Vec<ServiceOrder> = self
            .store
            .orders
            .lock()
            .await
            .values()
            .filter(|order| order.customer_id() == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(orders)
    }

    async fn find_by_worker(&self, worker_id: &WorkerId) -> AppResult<Vec<ServiceOrder>> {
        let listing_ids: HashSet<ListingId> = self
            .store
            .listings
            .lock()
            .await
            .values()
            .filter(|listing| listing.worker_id() == worker_id)
            .map(|listing| *listing.id())
            .collect();

        let mut orders: Vec<ServiceOrder> = self
            .store
            .orders
            .lock()
            .await
            .values()
            .filter(|order| listing_ids.contains(order.listing_id()))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(orders)
    }

    async fn save(&self, order: &ServiceOrder) -> AppResult<()> {
        self.store
            .orders
            .lock()
            .await
            .insert(*order.id(), order.clone());
        Ok(())
    }

    async fn update(&self, order: &ServiceOrder) -> AppResult<()> {
        self.save(order).await
    }

    async fn delete(&self, id: &OrderId) -> AppResult<()> {
        self.store.orders.lock().await.remove(id);
        Ok(())
    }
}

/// 内存工作单元，写入直达共享存储，提交与回滚都是空操作
pub struct InMemoryUnitOfWork {
    users: InMemoryUserProfileRepository,
    workers: InMemoryWorkerRepository,
    customers: InMemoryCustomerRepository,
    jobs: InMemoryJobRepository,
    listings: InMemoryListingRepository,
    orders: InMemoryOrderRepository,
}

impl InMemoryUnitOfWork {
    pub fn new(store: Arc<MarketplaceStore>) -> Self {
        Self {
            users: InMemoryUserProfileRepository::new(store.clone()),
            workers: InMemoryWorkerRepository::new(store.clone()),
            customers: InMemoryCustomerRepository::new(store.clone()),
            jobs: InMemoryJobRepository::new(store.clone()),
            listings: InMemoryListingRepository::new(store.clone()),
            orders: InMemoryOrderRepository::new(store),
        }
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn users(&self) -> &dyn UserProfileRepository {
        &self.users
    }

    fn workers(&self) -> &dyn WorkerRepository {
        &self.workers
    }

    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn jobs(&self) -> &dyn JobRepository {
        &self.jobs
    }

    fn listings(&self) -> &dyn ListingRepository {
        &self.listings
    }

    fn orders(&self) -> &dyn OrderRepository {
        &self.orders
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemoryUnitOfWorkFactory {
    store: Arc<MarketplaceStore>,
}

impl InMemoryUnitOfWorkFactory {
    pub fn new(store: Arc<MarketplaceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryUnitOfWorkFactory {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        Ok(Box::new(InMemoryUnitOfWork::new(self.store.clone())))
    }
}

/// 测试夹具：共享存储加种子与快照辅助
pub struct TestBackend {
    pub store: Arc<MarketplaceStore>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MarketplaceStore::default()),
        }
    }

    pub fn uow_factory(&self) -> Arc<dyn UnitOfWorkFactory> {
        Arc::new(InMemoryUnitOfWorkFactory::new(self.store.clone()))
    }

    pub fn user_repo(&self) -> Arc<dyn UserProfileRepository> {
        Arc::new(InMemoryUserProfileRepository::new(self.store.clone()))
    }

    pub fn worker_repo(&self) -> Arc<dyn WorkerRepository> {
        Arc::new(InMemoryWorkerRepository::new(self.store.clone()))
    }

    pub fn customer_repo(&self) -> Arc<dyn CustomerRepository> {
        Arc::new(InMemoryCustomerRepository::new(self.store.clone()))
    }

    pub fn job_repo(&self) -> Arc<dyn JobRepository> {
        Arc::new(InMemoryJobRepository::new(self.store.clone()))
    }

    pub fn listing_repo(&self) -> Arc<dyn ListingRepository> {
        Arc::new(InMemoryListingRepository::new(self.store.clone()))
    }

    pub fn order_repo(&self) -> Arc<dyn OrderRepository> {
        Arc::new(InMemoryOrderRepository::new(self.store.clone()))
    }

    pub async fn seed_user(&self, first_name: &str, last_name: &str) -> UserProfile {
        let email = format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        );
        let user = UserProfile::new(first_name, last_name, email, "3001234567");
        self.insert_user(user).await
    }

    pub async fn insert_user(&self, user: UserProfile) -> UserProfile {
        self.store
            .users
            .lock()
            .await
            .insert(*user.id(), user.clone());
        user
    }

    pub async fn seed_worker(&self, user: &UserProfile) -> Worker {
        self.insert_worker(Worker::new(*user.id())).await
    }

    pub async fn insert_worker(&self, worker: Worker) -> Worker {
        self.store
            .workers
            .lock()
            .await
            .insert(*worker.id(), worker.clone());
        worker
    }

    pub async fn seed_customer(&self, user: &UserProfile) -> Customer {
        let customer = Customer::new(*user.id());
        self.store
            .customers
            .lock()
            .await
            .insert(*customer.id(), customer.clone());
        customer
    }

    pub async fn seed_job(&self, name: &str) -> Job {
        let job = Job::new(name);
        self.store.jobs.lock().await.insert(*job.id(), job.clone());
        job
    }

    pub async fn seed_listing(
        &self,
        worker: &Worker,
        job: &Job,
        price: f64,
        description: &str,
    ) -> Listing {
        let listing = Listing::new(*worker.id(), *job.id(), price, description);
        self.store
            .listings
            .lock()
            .await
            .insert(*listing.id(), listing.clone());
        listing
    }

    pub async fn insert_order(&self, order: ServiceOrder) -> ServiceOrder {
        self.store
            .orders
            .lock()
            .await
            .insert(*order.id(), order.clone());
        order
    }

    pub async fn worker_snapshot(&self, id: &WorkerId) -> Worker {
        self.store
            .workers
            .lock()
            .await
            .get(id)
            .cloned()
            .expect("worker should exist in store")
    }

    pub async fn order_snapshot(&self, id: &OrderId) -> ServiceOrder {
        self.store
            .orders
            .lock()
            .await
            .get(id)
            .cloned()
            .expect("order should exist in store")
    }

    pub async fn listing_count(&self) -> usize {
        self.store.listings.lock().await.len()
    }

    pub async fn order_count(&self) -> usize {
        self.store.orders.lock().await.len()
    }

    /// 取仅有的一条工单，数量不为一时断言失败
    pub async fn only_order(&self) -> ServiceOrder {
        let orders = self.store.orders.lock().await;
        assert_eq!(orders.len(), 1, "expected exactly one order in store");
        orders.values().next().cloned().unwrap()
    }
}
