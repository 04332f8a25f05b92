/// 公共验证函数模块
/// 校验学习计划参数与导入单词，供 Plan Engine 和目录导入共用。
use crate::constants::{MAX_PER_DAY, MAX_PLAN_DAYS};

/// 验证计划参数：词书非空，perDay / days 在合理区间内
pub fn validate_plan_params(
    book_ids: &[String],
    per_day: u32,
    days: u32,
) -> Result<(), &'static str> {
    if book_ids.is_empty() {
        return Err("计划必须至少选择一本词书");
    }
    if book_ids.iter().any(|id| id.trim().is_empty()) {
        return Err("词书 ID 不能为空");
    }
    if per_day == 0 || per_day > MAX_PER_DAY {
        return Err("每日单词数必须在 1 到 500 之间");
    }
    if days == 0 || days > MAX_PLAN_DAYS {
        return Err("计划天数必须在 1 到 3650 之间");
    }
    Ok(())
}

/// 验证导入单词：词形与释义非空，词形不含 key 分隔符
pub fn validate_word_text(word: &str, definition: &str) -> Result<(), &'static str> {
    let trimmed = word.trim();
    if trimmed.is_empty() {
        return Err("单词不能为空");
    }
    if trimmed.contains(':') {
        return Err("单词不能包含冒号");
    }
    if definition.trim().is_empty() {
        return Err("释义不能为空");
    }
    Ok(())
}
