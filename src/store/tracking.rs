use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;

pub const TRACKING_PREFIX: &str = "CM";

/// `CM` followed by nine random digits. Collisions are possible but unlikely.
pub fn generate_tracking_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: u32 = rng.gen_range(100_000_000..=999_999_999);
    format!("{TRACKING_PREFIX}{suffix}")
}

pub(crate) fn is_tracking_id(candidate: &str) -> bool {
    lazy_static! {
        static ref TRACKING_RE: Regex =
            Regex::new(&format!("^{TRACKING_PREFIX}[0-9]{{9}}$")).unwrap();
    }
    TRACKING_RE.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn generated_ids_match_the_pattern() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let id = generate_tracking_id(&mut rng);
            assert!(is_tracking_id(&id), "{id}");
        }
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!(!is_tracking_id("CM12345678"));
        assert!(!is_tracking_id("XX123456789"));
        assert!(!is_tracking_id("CM1234567890"));
        assert!(is_tracking_id("CM555555555"));
        // Arabic-Indic digits are still digits to Unicode
        assert!(!is_tracking_id("CM١٢٣٤٥٦٧٨٩"));
    }
}
