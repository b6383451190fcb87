use sea_orm::sea_query::LikeExpr;

/// 转义 LIKE 模式中的通配符，防止搜索词被当作模式
pub fn escape_like_pattern(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// 构造 `%input%` 的子串匹配，反斜杠作为转义符
pub fn contains_pattern(input: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(input))).escape('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("alice"), "alice");
        assert_eq!(escape_like_pattern("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
    }
}
