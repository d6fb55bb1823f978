use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Configuration Error: trait '{trait_name}' has no variants to fill its pool")]
    EmptyTrait { trait_name: String },

    #[error("Pool Overflow: trait '{trait_name}' requested {requested} entries for a collection of {capacity}")]
    PoolOverflow {
        trait_name: String,
        requested: usize,
        capacity: usize,
    },

    #[error("Allocation Exhausted: pool of trait '{trait_name}' ran dry after {produced}/{target} unique items")]
    Exhausted {
        trait_name: String,
        produced: usize,
        target: usize,
    },

    #[error("Duplicate Combination: '{identifier}' cannot be made unique without any traits")]
    DuplicateCombination { identifier: String },

    #[error("Allocation Stalled: {retries} consecutive collisions after {produced}/{target} unique items")]
    RetriesExceeded {
        produced: usize,
        target: usize,
        retries: usize,
    },

    #[error("Record Error: {0}")]
    Record(String),

    #[error("Cancelled after {produced}/{target} items")]
    Cancelled { produced: usize, target: usize },
}

pub type ForgeResult<T> = Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhaustion_names_the_trait() {
        let err = ForgeError::Exhausted {
            trait_name: "Hat".into(),
            produced: 2,
            target: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("'Hat'"));
        assert!(msg.contains("2/4"));
    }

    #[test]
    fn json_errors_convert() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: ForgeError = parse.unwrap_err().into();
        assert!(matches!(err, ForgeError::Json(_)));
    }
}
