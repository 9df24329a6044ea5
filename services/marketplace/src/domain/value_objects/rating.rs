//! 工人评分聚合
//!
//! 以 (总和, 次数) 形式存储，每次评分 O(1) 折叠；
//! 对外暴露的均值与全量重算的算术平均一致。

use serde::{Deserialize, Serialize};

/// 评分聚合值对象
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingAggregate {
    sum: f64,
    count: i64,
}

impl RatingAggregate {
    pub fn new(sum: f64, count: i64) -> Self {
        Self { sum, count }
    }

    /// 折叠一次新评分
    pub fn fold(&mut self, rating: f64) {
        self.sum += rating;
        self.count += 1;
    }

    /// 算术平均值，无评分时为 0
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn count(&self) -> i64 {
        self.count
    }
}
