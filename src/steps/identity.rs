use crate::domain::record::{AccountType, OnboardingRecord, RecordPatch};
use crate::validation::{self, PasswordChecks};

pub const NAME_ERROR: &str = "Please enter a valid name.";
pub const EMAIL_ERROR: &str = "Please enter a valid email.";
pub const PASSWORD_ERROR: &str = "Password must meet criteria.";
pub const CONFIRM_PASSWORD_ERROR: &str = "Passwords do not match.";

/// Error flags for the account step. Every flag exists from construction;
/// only the pair matching the selected kind is ever raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityErrors {
    pub name: bool,
    pub email: bool,
    pub password: bool,
    pub confirm_password: bool,
}

impl IdentityErrors {
    pub fn any(&self) -> bool {
        self.name || self.email || self.password || self.confirm_password
    }
}

/// First step: applicant kind, the matching identity pair, and credentials.
/// The drafts for both kinds are kept so toggling the selector back and
/// forth does not lose what was typed.
#[derive(Debug, Clone)]
pub struct IdentityStep {
    kind: AccountType,
    full_name: String,
    email: String,
    business_name: String,
    business_email: String,
    password: String,
    confirm_password: String,
    errors: IdentityErrors,
}

impl IdentityStep {
    pub fn new() -> Self {
        Self::from_record(&OnboardingRecord::default())
    }

    /// Prefills the draft so a backward navigation shows what was entered.
    pub fn from_record(record: &OnboardingRecord) -> Self {
        let password = record.password.clone().unwrap_or_default();
        Self {
            kind: record.account_type.unwrap_or_default(),
            full_name: record.full_name.clone().unwrap_or_default(),
            email: record.email.clone().unwrap_or_default(),
            business_name: record.business_name.clone().unwrap_or_default(),
            business_email: record.business_email.clone().unwrap_or_default(),
            confirm_password: password.clone(),
            password,
            errors: IdentityErrors::default(),
        }
    }

    pub fn kind(&self) -> AccountType {
        self.kind
    }

    pub fn set_kind(&mut self, kind: AccountType) {
        if self.kind != kind {
            self.kind = kind;
            self.errors.name = false;
            self.errors.email = false;
        }
    }

    pub fn name(&self) -> &str {
        match self.kind {
            AccountType::Individual => &self.full_name,
            AccountType::Business => &self.business_name,
        }
    }

    pub fn email(&self) -> &str {
        match self.kind {
            AccountType::Individual => &self.email,
            AccountType::Business => &self.business_email,
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Updates the name belonging to the current kind. Editing clears the
    /// field's error flag until the next validation pass.
    pub fn set_name(&mut self, value: &str) {
        match self.kind {
            AccountType::Individual => self.full_name = value.to_string(),
            AccountType::Business => self.business_name = value.to_string(),
        }
        self.errors.name = false;
    }

    pub fn set_email(&mut self, value: &str) {
        match self.kind {
            AccountType::Individual => self.email = value.to_string(),
            AccountType::Business => self.business_email = value.to_string(),
        }
        self.errors.email = false;
    }

    pub fn set_password(&mut self, value: &str) {
        self.password = value.to_string();
        self.errors.password = false;
    }

    pub fn set_confirm_password(&mut self, value: &str) {
        self.confirm_password = value.to_string();
        self.errors.confirm_password = false;
    }

    /// Live checklist for the current password draft.
    pub fn password_checks(&self) -> PasswordChecks {
        PasswordChecks::evaluate(&self.password)
    }

    pub fn errors(&self) -> IdentityErrors {
        self.errors
    }

    /// The proceed gate: no raised error flag and no required field empty.
    pub fn can_advance(&self) -> bool {
        !self.errors.any()
            && !self.name().is_empty()
            && !self.email().is_empty()
            && !self.password.is_empty()
            && !self.confirm_password.is_empty()
    }

    /// Full validation pass; raises flags for every failing field.
    pub fn validate(&mut self) -> bool {
        self.errors = IdentityErrors {
            name: !validation::is_valid_name(self.name()),
            email: !validation::is_valid_email(self.email()),
            password: !self.password_checks().all_satisfied(),
            confirm_password: !validation::passwords_match(&self.password, &self.confirm_password),
        };
        !self.errors.any()
    }

    /// Validates and, on success, emits the commit patch: the kind, the
    /// matching identity pair, and the password. The confirmation never
    /// leaves the step.
    pub fn submit(&mut self) -> Option<RecordPatch> {
        if !self.validate() {
            return None;
        }
        let mut patch = RecordPatch {
            account_type: Some(self.kind),
            password: Some(self.password.clone()),
            ..Default::default()
        };
        match self.kind {
            AccountType::Individual => {
                patch.full_name = Some(self.full_name.clone());
                patch.email = Some(self.email.clone());
            }
            AccountType::Business => {
                patch.business_name = Some(self.business_name.clone());
                patch.business_email = Some(self.business_email.clone());
            }
        }
        Some(patch)
    }

    /// Active error messages in display order.
    pub fn messages(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.errors.name {
            out.push(NAME_ERROR);
        }
        if self.errors.email {
            out.push(EMAIL_ERROR);
        }
        if self.errors.password {
            out.push(PASSWORD_ERROR);
        }
        if self.errors.confirm_password {
            out.push(CONFIRM_PASSWORD_ERROR);
        }
        out
    }
}

impl Default for IdentityStep {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_individual() -> IdentityStep {
        let mut step = IdentityStep::new();
        step.set_name("Jane Doe");
        step.set_email("jane@example.com");
        step.set_password("Str0ng!pass");
        step.set_confirm_password("Str0ng!pass");
        step
    }

    #[test]
    fn weak_password_blocks_submission() {
        let mut step = filled_individual();
        step.set_password("alllowercase");
        step.set_confirm_password("alllowercase");

        assert!(step.submit().is_none());
        assert!(step.errors().password);
        assert!(!step.can_advance());
        assert!(step.messages().contains(&PASSWORD_ERROR));
    }

    #[test]
    fn mismatched_confirmation_blocks_submission() {
        let mut step = filled_individual();
        step.set_confirm_password("Str0ng!pas");

        assert!(step.submit().is_none());
        assert!(step.errors().confirm_password);
    }

    #[test]
    fn empty_required_fields_disable_the_gate() {
        let step = IdentityStep::new();
        assert!(!step.can_advance());

        let step = filled_individual();
        assert!(step.can_advance());
    }

    #[test]
    fn individual_submit_emits_only_the_individual_pair() {
        let mut step = filled_individual();
        let patch = step.submit().expect("valid step should commit");

        assert_eq!(patch.account_type, Some(AccountType::Individual));
        assert_eq!(patch.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(patch.email.as_deref(), Some("jane@example.com"));
        assert_eq!(patch.business_name, None);
        assert_eq!(patch.business_email, None);
        assert_eq!(patch.password.as_deref(), Some("Str0ng!pass"));
    }

    #[test]
    fn business_submit_emits_only_the_business_pair() {
        let mut step = IdentityStep::new();
        step.set_kind(AccountType::Business);
        step.set_name("Acme Holdings");
        step.set_email("ops@acme.example");
        step.set_password("Str0ng!pass");
        step.set_confirm_password("Str0ng!pass");

        let patch = step.submit().expect("valid step should commit");
        assert_eq!(patch.account_type, Some(AccountType::Business));
        assert_eq!(patch.business_name.as_deref(), Some("Acme Holdings"));
        assert_eq!(patch.full_name, None);
    }

    #[test]
    fn digit_in_name_is_rejected() {
        let mut step = filled_individual();
        step.set_name("Jane 2nd");
        assert!(step.submit().is_none());
        assert!(step.errors().name);
    }

    #[test]
    fn toggling_kind_keeps_both_drafts() {
        let mut step = filled_individual();
        step.set_kind(AccountType::Business);
        step.set_name("Acme Holdings");
        step.set_kind(AccountType::Individual);

        assert_eq!(step.name(), "Jane Doe");
    }

    #[test]
    fn prefill_round_trips_through_the_record() {
        let mut record = OnboardingRecord::default();
        let mut step = filled_individual();
        record.merge(step.submit().unwrap());

        let revisited = IdentityStep::from_record(&record);
        assert_eq!(revisited.name(), "Jane Doe");
        assert!(revisited.can_advance());
    }
}
