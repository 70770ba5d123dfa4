/*
 * Responsibility
 * - 内部 ID → 公開 ID の変換 (encode)
 * - sqids の設定・方式変更の影響をこの service に局所化する
 * - posts / technologies のレスポンスで public_id を埋めるのに使う
 *   (パスは数値 ID を受けるので decode 側は持たない)
 */
use sqids::Sqids;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdCodecError {
    #[error("SQIDS_MIN_LENGTH must be between 0 and 255, got {0}")]
    InvalidMinLength(usize),
    #[error("sqids error: {0}")]
    Sqids(#[from] sqids::Error),
    #[error("id must be non-negative, got {0}")]
    NegativeId(i64),
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self, IdCodecError> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength(min_length))?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String, IdCodecError> {
        if id < 0 {
            return Err(IdCodecError::NegativeId(id));
        }
        Ok(self.sqids.encode(&[id as u64])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> IdCodec {
        IdCodec::new(10, "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789").unwrap()
    }

    #[test]
    fn encode_is_deterministic_and_respects_min_length() {
        let codec = codec();
        for id in [0i64, 1, 42, 9_999_999] {
            let public = codec.encode(id).unwrap();
            assert!(public.len() >= 10);
            assert_eq!(codec.encode(id).unwrap(), public);
        }
    }

    #[test]
    fn distinct_ids_get_distinct_public_ids() {
        let codec = codec();
        let mut seen = std::collections::HashSet::new();
        for id in 0..100 {
            assert!(seen.insert(codec.encode(id).unwrap()), "collision at {id}");
        }
    }

    #[test]
    fn encode_rejects_negative_ids() {
        assert!(matches!(
            codec().encode(-1),
            Err(IdCodecError::NegativeId(-1))
        ));
    }
}
