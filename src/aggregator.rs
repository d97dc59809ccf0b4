//! Streaming aggregation over an in-memory MPS7 buffer.
//!
//! Walks the records after the header one at a time, folding each into
//! running totals. Records are not retained.

use crate::error::Result;
use crate::header::Header;
use crate::record::{Record, RecordType};
use log::{debug, info, warn};

/// User tracked by the CLI when no other is configured.
pub const DEFAULT_SELECTED_USER: u64 = 2_456_938_384_156_277_127;

/// How many records to decode relative to the header's declared count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountPolicy {
    /// Decode exactly `declared_count` records.
    #[default]
    Exact,

    /// Decode `declared_count + 1` records, matching logs produced and
    /// consumed by tools that treat the count as an inclusive upper bound.
    Inclusive,
}

impl CountPolicy {
    /// Number of records to decode for a header.
    pub fn iterations(self, header: &Header) -> u64 {
        let declared = u64::from(header.declared_count);
        match self {
            CountPolicy::Exact => declared,
            CountPolicy::Inclusive => declared + 1,
        }
    }
}

/// Per-run aggregation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// User whose net balance is tracked.
    pub selected_user: u64,

    /// Record count interpretation.
    pub count_policy: CountPolicy,
}

impl AggregatorConfig {
    /// Tracks `selected_user` with the exact count policy.
    pub fn new(selected_user: u64) -> Self {
        AggregatorConfig {
            selected_user,
            count_policy: CountPolicy::Exact,
        }
    }

    /// Replaces the count policy.
    pub fn with_count_policy(mut self, count_policy: CountPolicy) -> Self {
        self.count_policy = count_policy;
        self
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SELECTED_USER)
    }
}

/// Totals produced by one aggregation run.
///
/// Amounts are unrounded sums of the decoded `f64` values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// Number of autopay start records.
    pub autopay_started: u64,

    /// Number of autopay end records.
    pub autopay_ended: u64,

    /// Sum of all debit amounts, any user.
    pub total_debits: f64,

    /// Sum of all credit amounts, any user.
    pub total_credits: f64,

    /// Debits minus credits for the selected user.
    pub selected_user_balance: f64,
}

impl Summary {
    /// Folds one record into the totals.
    fn apply(&mut self, record: &Record, selected_user: u64) {
        let amount = record.amount.unwrap_or(0.0);

        match record.kind {
            RecordType::Debit => self.total_debits += amount,
            RecordType::Credit => self.total_credits += amount,
            RecordType::AutopayStart => self.autopay_started += 1,
            RecordType::AutopayEnd => self.autopay_ended += 1,
        }

        if record.user_id == selected_user {
            match record.kind {
                RecordType::Debit => self.selected_user_balance += amount,
                RecordType::Credit => self.selected_user_balance -= amount,
                RecordType::AutopayStart | RecordType::AutopayEnd => {}
            }
        }
    }
}

/// Decodes the records following `header` and accumulates a [`Summary`].
///
/// Stops at the first decode error; no partial summary is returned.
pub fn aggregate(buf: &[u8], header: &Header, config: &AggregatorConfig) -> Result<Summary> {
    let iterations = config.count_policy.iterations(header);
    let mut offset = header.header_size();
    let mut summary = Summary::default();

    debug!(
        "Decoding {} records for selected user {}",
        iterations, config.selected_user
    );

    for _ in 0..iterations {
        let (record, consumed) = Record::decode(buf, offset)?;
        offset += consumed;
        summary.apply(&record, config.selected_user);
    }

    if offset < buf.len() {
        warn!(
            "{} trailing bytes after the last record, ignoring",
            buf.len() - offset
        );
    }

    info!(
        "Aggregated {} records: {} debits, {} credits",
        iterations, summary.total_debits, summary.total_credits
    );

    Ok(summary)
}

/// Decodes the header at the start of `buf` and aggregates the records after it.
pub fn summarize(buf: &[u8], config: &AggregatorConfig) -> Result<Summary> {
    let header = Header::decode(buf)?;
    aggregate(buf, &header, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Mps7Error;

    struct LogBuilder {
        buf: Vec<u8>,
    }

    impl LogBuilder {
        fn new(count: u32) -> Self {
            let mut buf = b"MPS7".to_vec();
            buf.push(1);
            buf.extend_from_slice(&count.to_be_bytes());
            LogBuilder { buf }
        }

        fn prefix(mut self, tag: u8, user: u64) -> Self {
            self.buf.push(tag);
            self.buf.extend_from_slice(&1_393_108_945u32.to_be_bytes());
            self.buf.extend_from_slice(&user.to_be_bytes());
            self
        }

        fn debit(self, user: u64, amount: f64) -> Self {
            self.prefix(0x00, user).amount(amount)
        }

        fn credit(self, user: u64, amount: f64) -> Self {
            self.prefix(0x01, user).amount(amount)
        }

        fn start(self, user: u64) -> Self {
            self.prefix(0x02, user)
        }

        fn end(self, user: u64) -> Self {
            self.prefix(0x03, user)
        }

        fn amount(mut self, amount: f64) -> Self {
            self.buf.extend_from_slice(&amount.to_be_bytes());
            self
        }

        fn build(self) -> Vec<u8> {
            self.buf
        }
    }

    #[test]
    fn test_mixed_records() {
        let buf = LogBuilder::new(3)
            .debit(42, 100.0)
            .credit(42, 30.0)
            .start(7)
            .build();

        let summary = summarize(&buf, &AggregatorConfig::new(42)).unwrap();

        assert_eq!(summary.total_debits, 100.0);
        assert_eq!(summary.total_credits, 30.0);
        assert_eq!(summary.autopay_started, 1);
        assert_eq!(summary.autopay_ended, 0);
        assert_eq!(summary.selected_user_balance, 70.0);
    }

    #[test]
    fn test_totals_include_every_user() {
        let buf = LogBuilder::new(6)
            .debit(1, 10.0)
            .debit(2, 20.0)
            .credit(3, 5.0)
            .debit(42, 1.0)
            .credit(42, 4.0)
            .credit(42, 0.5)
            .build();

        let summary = summarize(&buf, &AggregatorConfig::new(42)).unwrap();

        assert_eq!(summary.total_debits, 31.0);
        assert_eq!(summary.total_credits, 9.5);
        assert_eq!(summary.selected_user_balance, -3.5);
    }

    #[test]
    fn test_toggles_do_not_touch_balance() {
        let buf = LogBuilder::new(4)
            .start(42)
            .end(42)
            .end(42)
            .start(1)
            .build();

        let summary = summarize(&buf, &AggregatorConfig::new(42)).unwrap();

        assert_eq!(summary.autopay_started, 2);
        assert_eq!(summary.autopay_ended, 2);
        assert_eq!(summary.selected_user_balance, 0.0);
        assert_eq!(summary.total_debits, 0.0);
    }

    #[test]
    fn test_selected_user_is_configurable() {
        let buf = LogBuilder::new(2).debit(1, 10.0).debit(2, 25.0).build();

        let one = summarize(&buf, &AggregatorConfig::new(1)).unwrap();
        let two = summarize(&buf, &AggregatorConfig::new(2)).unwrap();

        assert_eq!(one.selected_user_balance, 10.0);
        assert_eq!(two.selected_user_balance, 25.0);
        assert_eq!(one.total_debits, two.total_debits);
    }

    #[test]
    fn test_empty_log() {
        let buf = LogBuilder::new(0).build();
        let summary = summarize(&buf, &AggregatorConfig::default()).unwrap();
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_unknown_tag_halts() {
        let mut buf = LogBuilder::new(1).build();
        buf.push(0x09);
        buf.extend_from_slice(&[0; 20]);

        match summarize(&buf, &AggregatorConfig::default()) {
            Err(Mps7Error::UnknownRecordType { tag, offset }) => {
                assert_eq!(tag, 0x09);
                assert_eq!(offset, 9);
            }
            other => panic!("Expected UnknownRecordType, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tag_after_valid_records_halts() {
        let mut buf = LogBuilder::new(3).debit(1, 1.0).start(1).build();
        buf.push(0x04);
        buf.extend_from_slice(&[0; 12]);

        assert!(matches!(
            summarize(&buf, &AggregatorConfig::default()),
            Err(Mps7Error::UnknownRecordType { offset: 43, .. })
        ));
    }

    #[test]
    fn test_declared_count_past_end_is_fatal() {
        let buf = LogBuilder::new(3).debit(1, 1.0).start(1).build();

        assert!(matches!(
            summarize(&buf, &AggregatorConfig::default()),
            Err(Mps7Error::TruncatedRecord { offset: 43, .. })
        ));
    }

    #[test]
    fn test_truncated_final_record() {
        let mut buf = LogBuilder::new(2).start(1).debit(1, 2.0).build();
        buf.pop();

        assert!(matches!(
            summarize(&buf, &AggregatorConfig::default()),
            Err(Mps7Error::TruncatedRecord { needed: 21, .. })
        ));
    }

    #[test]
    fn test_exact_policy_ignores_trailing_records() {
        let buf = LogBuilder::new(1).debit(1, 5.0).debit(1, 7.0).build();
        let summary = summarize(&buf, &AggregatorConfig::new(1)).unwrap();
        assert_eq!(summary.total_debits, 5.0);
    }

    #[test]
    fn test_inclusive_policy_reads_one_extra_record() {
        let buf = LogBuilder::new(1).debit(1, 5.0).debit(1, 7.0).build();
        let config = AggregatorConfig::new(1).with_count_policy(CountPolicy::Inclusive);

        let summary = summarize(&buf, &config).unwrap();
        assert_eq!(summary.total_debits, 12.0);
        assert_eq!(summary.selected_user_balance, 12.0);
    }

    #[test]
    fn test_inclusive_policy_fails_without_extra_record() {
        let buf = LogBuilder::new(1).debit(1, 5.0).build();
        let config = AggregatorConfig::new(1).with_count_policy(CountPolicy::Inclusive);

        assert!(matches!(
            summarize(&buf, &config),
            Err(Mps7Error::TruncatedRecord { offset: 30, .. })
        ));
    }

    #[test]
    fn test_bad_magic_stops_before_records() {
        let mut buf = LogBuilder::new(1).debit(1, 5.0).build();
        buf[..4].copy_from_slice(b"XXXX");

        assert!(matches!(
            summarize(&buf, &AggregatorConfig::default()),
            Err(Mps7Error::MalformedHeader { .. })
        ));
    }
}
