//! State behind the "add transaction" modal.
//!
//! The modal being open and the draft existing are the same thing: closing
//! drops the draft. Nothing is validated until submit. The date field never
//! blocks a submit: text that does not parse records the entry under today.

use crate::clock::Clock;
use crate::config::CoreConfig;
use crate::transactions::amount::{parse_positive_minor, AmountError};
use crate::transactions::record::{TransactionKind, TransactionRecord, UNCATEGORIZED_TAG};
use crate::transactions::store::{StoreError, TransactionStore};
use crate::validation::{
    from_result, non_empty, Field, FormRules, RulesBuilder, ValidationErrors, Violation,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Date formats accepted after the configured one.
const FALLBACK_DATE_FORMATS: [&str; 3] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d"];

/// In-progress entry, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTransaction {
    pub kind: TransactionKind,
    pub title: String,
    pub amount_text: String,
    pub category: Option<String>,
    pub date_text: String,
    pub category_picker_open: bool,
}

impl DraftTransaction {
    pub fn new(date_text: impl Into<String>) -> Self {
        Self {
            kind: TransactionKind::default(),
            title: String::new(),
            amount_text: String::new(),
            category: None,
            date_text: date_text.into(),
            category_picker_open: false,
        }
    }
}

/// Free-text fields of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Title,
    Amount,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("the editor is not open")]
    Closed,

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EditorError {
    /// Fields to highlight, empty for non-validation failures.
    pub fn fields(&self) -> Vec<Field> {
        match self {
            Self::Invalid(errors) => errors.fields(),
            _ => Vec::new(),
        }
    }
}

pub struct TransactionEditor<S, C> {
    store: S,
    clock: C,
    config: CoreConfig,
    draft: Option<DraftTransaction>,
}

impl<S: TransactionStore, C: Clock> TransactionEditor<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self::with_config(store, clock, CoreConfig::default())
    }

    pub fn with_config(store: S, clock: C, config: CoreConfig) -> Self {
        Self {
            store,
            clock,
            config,
            draft: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&DraftTransaction> {
        self.draft.as_ref()
    }

    /// Items for the category picker.
    pub fn categories(&self) -> &[String] {
        &self.config.categories
    }

    /// Show the modal with a fresh draft dated today. Keeps the current
    /// draft if the modal is already open.
    pub fn open(&mut self) -> &DraftTransaction {
        let today = self.clock.today();
        let date_format = &self.config.date_format;
        self.draft.get_or_insert_with(|| {
            DraftTransaction::new(today.format(date_format).to_string())
        })
    }

    /// Hide the modal and discard the draft.
    pub fn close(&mut self) {
        if self.draft.take().is_some() {
            debug!("draft discarded");
        }
    }

    pub fn set_kind(&mut self, kind: TransactionKind) -> Result<(), EditorError> {
        self.draft_mut()?.kind = kind;
        Ok(())
    }

    pub fn set_field(&mut self, field: DraftField, value: &str) -> Result<(), EditorError> {
        let draft = self.draft_mut()?;
        let slot = match field {
            DraftField::Title => &mut draft.title,
            DraftField::Amount => &mut draft.amount_text,
            DraftField::Date => &mut draft.date_text,
        };
        *slot = value.to_string();
        Ok(())
    }

    /// Flip the picker; returns whether it is now open.
    pub fn toggle_category_picker(&mut self) -> Result<bool, EditorError> {
        let draft = self.draft_mut()?;
        draft.category_picker_open = !draft.category_picker_open;
        Ok(draft.category_picker_open)
    }

    /// Choose a category and close the picker in one step.
    ///
    /// `name` is matched case-insensitively against the configured list
    /// and stored with the configured spelling.
    pub fn select_category(&mut self, name: &str) -> Result<(), EditorError> {
        let draft = self.draft.as_mut().ok_or(EditorError::Closed)?;
        let wanted = name.trim();
        let chosen = self
            .config
            .categories
            .iter()
            .find(|c| c.eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| EditorError::UnknownCategory(wanted.to_string()))?;

        draft.category = Some(chosen);
        draft.category_picker_open = false;
        Ok(())
    }

    /// Validate the draft, hand the record to the store and close.
    ///
    /// On any failure the modal stays open with the draft untouched.
    pub async fn submit(&mut self) -> Result<TransactionRecord, EditorError> {
        let draft = self.draft.as_ref().ok_or(EditorError::Closed)?;
        let record = build_record(draft, &self.config, self.clock.today())?;

        if let Err(err) = self.store.append(record.clone()).await {
            warn!(error = %err, "could not save transaction");
            return Err(err.into());
        }
        info!(
            amount_minor = record.amount_minor,
            category = %record.category_tag,
            "transaction saved"
        );
        self.draft = None;
        Ok(record)
    }

    fn draft_mut(&mut self) -> Result<&mut DraftTransaction, EditorError> {
        self.draft.as_mut().ok_or(EditorError::Closed)
    }
}

fn draft_rules(config: &CoreConfig) -> FormRules<DraftTransaction> {
    let digits = config.minor_unit_digits;
    RulesBuilder::new()
        .require(|d: &DraftTransaction| non_empty(Field::Title, &d.title))
        .require(move |d: &DraftTransaction| {
            from_result(
                Field::Amount,
                parse_positive_minor(&d.amount_text, digits).map(|_| ()),
                amount_violation,
            )
        })
        .build()
}

fn amount_violation(err: AmountError) -> Violation {
    match err {
        AmountError::Empty => Violation::Empty,
        AmountError::TooPrecise { max_digits } => Violation::TooPrecise { max_digits },
        AmountError::Invalid(_) | AmountError::NotPositive | AmountError::Overflow => {
            Violation::NotPositiveAmount
        }
    }
}

/// Parse `text` with the configured format, then the fallbacks.
pub fn parse_date(text: &str, date_format: &str) -> Option<NaiveDate> {
    let text = text.trim();
    std::iter::once(date_format)
        .chain(FALLBACK_DATE_FORMATS)
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

fn build_record(
    draft: &DraftTransaction,
    config: &CoreConfig,
    today: NaiveDate,
) -> Result<TransactionRecord, ValidationErrors> {
    draft_rules(config).enforce(draft)?;

    let magnitude = parse_positive_minor(&draft.amount_text, config.minor_unit_digits)
        .map_err(|err| ValidationErrors::single(Field::Amount, amount_violation(err)))?;
    let date = parse_date(&draft.date_text, &config.date_format).unwrap_or_else(|| {
        debug!(date_text = %draft.date_text, "unreadable date, using today");
        today
    });
    let timestamp: DateTime<Utc> = date.and_time(NaiveTime::MIN).and_utc();

    Ok(TransactionRecord {
        label: draft.title.trim().to_string(),
        subtitle: None,
        amount_minor: draft.kind.signed(magnitude),
        timestamp,
        category_tag: draft
            .category
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| UNCATEGORIZED_TAG.to_string()),
    })
}
