// Utility modules

use crate::error::{AppError, Result};

/// Guard against oversized deck renders.
pub fn ensure_card_limit(count: usize, configured_max: usize) -> Result<()> {
    if count == 0 {
        return Err(AppError::BadRequest("cards must not be empty".to_string()));
    }
    let max = configured_max.max(1);
    if count > max {
        return Err(AppError::BadRequest(format!(
            "too many cards: {} (max {})",
            count, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_limit_bounds() {
        assert!(ensure_card_limit(0, 60).is_err());
        assert!(ensure_card_limit(1, 60).is_ok());
        assert!(ensure_card_limit(60, 60).is_ok());
        assert!(ensure_card_limit(61, 60).is_err());
        assert!(ensure_card_limit(1, 0).is_ok());
    }
}
