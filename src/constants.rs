/// 默认每日学习单词数（perDay 模式未显式配置时）
pub const DEFAULT_PER_DAY: u32 = 20;

/// perDay 模式允许的最大每日目标
pub const MAX_PER_DAY: u32 = 500;

/// deadline 模式允许的最大总天数
pub const MAX_PLAN_DAYS: u32 = 3650;

/// 单次取词批次的最大数量
pub const MAX_BATCH_SIZE: usize = 200;

/// Review 页待复习列表的默认条数
pub const DEFAULT_DUE_REVIEW_LIMIT: usize = 50;

/// 每天毫秒数
pub const MILLIS_PER_DAY: i64 = 86_400_000;
