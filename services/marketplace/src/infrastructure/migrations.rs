//! 服务的版本化迁移清单

use mande_adapter_postgres::Migration;

/// 按版本号排列的全部迁移
pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "initial_schema",
            include_str!("../../migrations/0001_initial_schema.sql"),
        ),
        Migration::new(
            2,
            "seed_jobs",
            include_str!("../../migrations/0002_seed_jobs.sql"),
        ),
    ]
}
