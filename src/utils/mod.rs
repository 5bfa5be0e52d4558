pub fn remove_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url[..url.len() - 1].to_string()
    } else {
        url.to_string()
    }
}

/// Format a currency amount for display, rounded to 2 decimal places.
///
/// All intermediate pricing math is unrounded; this is the only place an
/// amount gets rounded.
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_rounds_at_display_time() {
        assert_eq!(format_price(121.8), "$121.80");
        assert_eq!(format_price(2315.7225), "$2315.72");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(34.2225), "$34.22");
    }

    #[test]
    fn test_remove_trailing_slash() {
        assert_eq!(remove_trailing_slash("http://x/"), "http://x");
        assert_eq!(remove_trailing_slash("http://x"), "http://x");
    }
}

pub async fn retry<T, E, F, Fut>(mut retries: u32, base_delay_ms: u64, mut f: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Debug,
{
    let mut attempt = 0u32;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if retries == 0 => return Err(e),
            Err(e) => {
                // Exponential backoff: base_delay * 2^attempt, capped at 30s
                let delay = (base_delay_ms * (1u64 << attempt.min(5))).min(30_000);
                eprintln!("[retry] attempt {} failed ({:?}), retrying in {}ms...", attempt + 1, e, delay);
                tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
                retries -= 1;
                attempt += 1;
            }
        }
    }
}
