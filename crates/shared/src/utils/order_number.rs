use anyhow::Result;
use chrono::Utc;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};

const PREFIX: &str = "JF";
const SUFFIX_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 4;

/// Human-readable order number: `JF` + the last six digits of the creation
/// epoch-millis + four random uppercase alphanumerics. Assigned once at
/// order creation and used as the public tracking token.
pub fn generate_order_number() -> Result<String> {
    let stamp = Utc::now().timestamp_millis().rem_euclid(1_000_000);

    let mut seed = [0u8; 32];
    OsRng.try_fill_bytes(&mut seed)?;
    let mut rng = StdRng::from_seed(seed);

    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..SUFFIX_CHARS.len());
            SUFFIX_CHARS[idx] as char
        })
        .collect();

    Ok(format!("{PREFIX}{stamp:06}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_number_has_expected_shape() {
        let number = generate_order_number().unwrap();
        assert_eq!(number.len(), 12);
        assert!(number.starts_with("JF"));
        assert!(number[2..8].chars().all(|c| c.is_ascii_digit()));
        assert!(
            number[8..]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn consecutive_numbers_differ() {
        let a = generate_order_number().unwrap();
        let b = generate_order_number().unwrap();
        // Same millisecond is possible; the random suffix still separates them.
        assert_ne!(a, b);
    }
}
