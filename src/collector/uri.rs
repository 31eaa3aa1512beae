//! Bean fetch URI 조합

/// `base + suffix + object_name` 을 그대로 이어 붙입니다.
///
/// 구분자를 보정하거나 주소 형식을 검증하지 않습니다. 잘못된 주소는
/// 이후 HTTP 요청 단계에서 transport 에러로 드러납니다.
pub fn build_uri(base_url: &str, suffix: &str, object_name: &str) -> String {
    let mut uri = String::with_capacity(base_url.len() + suffix.len() + object_name.len());
    uri.push_str(base_url);
    uri.push_str(suffix);
    uri.push_str(object_name);
    uri
}
