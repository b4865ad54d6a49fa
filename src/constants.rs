/// 日报文档键使用的日期格式（YYYYMMDD）
pub const DATE_KEY_FORMAT: &str = "%Y%m%d";

/// 手动触发接口接受的日期格式
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// 默认聚合并发度（同时处理的用户数上限）
pub const DEFAULT_AGGREGATION_CONCURRENCY: usize = 8;

/// 实验分组快照的固定文档键
pub const COHORT_SNAPSHOT_KEY: &str = "latest";

/// Chat 结果码：立即开始
pub const CHAT_RESULT_START: i64 = 0;

/// Chat 结果码：稍后再说
pub const CHAT_RESULT_SNOOZE: i64 = 1;

/// Chat 结果码：放弃本次任务
pub const CHAT_RESULT_LEAVE: i64 = 2;
