//! Registration form state.
//!
//! Each registration screen is a plain record ([`PersonForm`],
//! [`CompanyForm`], [`StudentForm`], [`TeacherForm`], [`SupplierForm`])
//! wrapped in a [`FormState`] that tracks field errors and whether the
//! form's identifier document has been checked. State changes go through
//! [`FormState::update`], which consumes the state and returns the next
//! one:
//!
//! ```rust
//! use cadastro::form::{Field, FormState, Msg, PersonForm};
//!
//! let state = FormState::new(PersonForm::default())
//!     .update(Msg::Edit(Field::Cpf, "11144477735".into()))
//!     .update(Msg::CheckDocument);
//!
//! assert_eq!(state.data.cpf, "111.444.777-35");
//! assert!(state.document.is_valid());
//! ```

pub mod enrollment;
pub mod login;
pub mod records;

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::catalog;
use crate::document::DocumentKind;
use crate::format::validate_email;
use crate::mask::{self, only_digits};

pub use enrollment::{Enrollment, EnrollmentError, EnrollmentStage, Payment, DEFAULT_TUITION};
pub use login::{LoginError, LoginForm, Session, DEMO_PASSWORD};
pub use records::{
    Address, CompanyForm, Invoice, PersonForm, Product, StudentForm, SupplierForm, TeacherForm,
};

/// Every field that appears on some registration form.
///
/// Declaration order is display order, so the first entry of
/// [`FieldErrors`] is the topmost invalid field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Field {
    Nome,
    RazaoSocial,
    NomeFantasia,
    Matricula,
    Siape,
    Cpf,
    Cnpj,
    DataNascimento,
    Email,
    Telefone,
    CursoAtual,
    CargaHoraria,
    Historico,
    Frequencia,
    MetodoPagamento,
    Observacoes,
    Papel,
    InscricaoMunicipal,
    InscricaoEstadual,
    Rua,
    Numero,
    Complemento,
    Cep,
    Cidade,
    Estado,
}

impl Field {
    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Nome => "nome",
            Field::RazaoSocial => "razao_social",
            Field::NomeFantasia => "nome_fantasia",
            Field::Matricula => "matricula",
            Field::Siape => "siape",
            Field::Cpf => "cpf",
            Field::Cnpj => "cnpj",
            Field::DataNascimento => "data_nascimento",
            Field::Email => "email",
            Field::Telefone => "telefone",
            Field::CursoAtual => "curso_atual",
            Field::CargaHoraria => "carga_horaria",
            Field::Historico => "historico",
            Field::Frequencia => "frequencia",
            Field::MetodoPagamento => "metodo_pagamento",
            Field::Observacoes => "observacoes",
            Field::Papel => "papel",
            Field::InscricaoMunicipal => "inscricao_municipal",
            Field::InscricaoEstadual => "inscricao_estadual",
            Field::Rua => "rua",
            Field::Numero => "numero",
            Field::Complemento => "complemento",
            Field::Cep => "cep",
            Field::Cidade => "cidade",
            Field::Estado => "estado",
        }
    }

    /// The input mask applied when this field is edited.
    pub fn mask_kind(self) -> MaskKind {
        match self {
            Field::Cpf => MaskKind::Cpf,
            Field::Cnpj => MaskKind::Cnpj,
            Field::Telefone => MaskKind::Phone,
            Field::Cep => MaskKind::Cep,
            _ => MaskKind::None,
        }
    }
}

/// Input mask attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskKind {
    None,
    Cpf,
    Cnpj,
    Phone,
    Cep,
}

impl MaskKind {
    pub fn apply(self, raw: &str) -> String {
        match self {
            MaskKind::None => raw.to_string(),
            MaskKind::Cpf => mask::mask_cpf(raw),
            MaskKind::Cnpj => mask::mask_cnpj(raw),
            MaskKind::Phone => mask::mask_phone(raw),
            MaskKind::Cep => mask::mask_cep(raw),
        }
    }
}

/// Why a field was rejected. Messages are the ones shown next to the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldError {
    #[error("Campo obrigatório")]
    Required,

    #[error("Email inválido")]
    InvalidEmail,

    #[error("Por favor, valide o {kind} antes de salvar")]
    DocumentNotChecked { kind: DocumentKind },

    #[error("{kind} inválido, verifique os dígitos.")]
    InvalidDocument { kind: DocumentKind },

    #[error("Preenchimento incompleto")]
    Incomplete,

    #[error("Estado inválido")]
    UnknownState,

    #[error("Curso inexistente")]
    UnknownCourse,

    #[error("Valor inválido")]
    InvalidValue,
}

/// Field errors ordered by [`Field`] display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn remove(&mut self, field: Field) -> Option<FieldError> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The topmost invalid field.
    pub fn first(&self) -> Option<(Field, &FieldError)> {
        self.0.iter().next().map(|(f, e)| (*f, e))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(f, e)| (*f, e))
    }
}

/// Outcome of the last check of a form's identifier document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocumentStatus {
    /// Not checked since the last edit.
    #[default]
    Unchecked,
    Valid,
    Invalid,
}

impl DocumentStatus {
    pub fn is_valid(self) -> bool {
        self == DocumentStatus::Valid
    }
}

/// A registration form record.
pub trait Form: Default {
    /// The identifier document field, if the form has one.
    const DOCUMENT: Option<(Field, DocumentKind)>;

    /// Fields that must be non-blank before submitting.
    const REQUIRED: &'static [Field];

    /// Current text of `field`, or `None` if the form has no such field.
    fn text(&self, field: Field) -> Option<&str>;

    /// Mutable text of `field`, or `None` if the form has no such field.
    fn text_mut(&mut self, field: Field) -> Option<&mut String>;

    /// Validates the whole form.
    ///
    /// `document` is the status of the last document check; a document that
    /// hasn't been checked blocks submission.
    fn check(&self, document: DocumentStatus) -> FieldErrors {
        common_checks(self, document)
    }
}

/// Checks shared by every form: required fields, e-mail shape, document
/// status, and completeness of masked and catalog-backed fields.
pub fn common_checks<F: Form>(form: &F, document: DocumentStatus) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for &field in F::REQUIRED {
        if form.text(field).is_none_or(|v| v.trim().is_empty()) {
            errors.insert(field, FieldError::Required);
        }
    }

    let filled = move |field: Field| form.text(field).filter(|v| !v.trim().is_empty());

    if let Some(email) = filled(Field::Email)
        && !validate_email(email.trim())
    {
        errors.insert(Field::Email, FieldError::InvalidEmail);
    }

    if let Some((field, kind)) = F::DOCUMENT
        && filled(field).is_some()
    {
        match document {
            DocumentStatus::Valid => {}
            DocumentStatus::Unchecked => {
                errors.insert(field, FieldError::DocumentNotChecked { kind });
            }
            DocumentStatus::Invalid => {
                errors.insert(field, FieldError::InvalidDocument { kind });
            }
        }
    }

    if let Some(phone) = filled(Field::Telefone)
        && only_digits(phone).len() < 10
    {
        errors.insert(Field::Telefone, FieldError::Incomplete);
    }

    if let Some(cep) = filled(Field::Cep)
        && only_digits(cep).len() != mask::CEP_DIGITS
    {
        errors.insert(Field::Cep, FieldError::Incomplete);
    }

    if let Some(uf) = filled(Field::Estado)
        && !catalog::is_state(uf)
    {
        errors.insert(Field::Estado, FieldError::UnknownState);
    }

    errors
}

/// An input to [`FormState::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Raw keystrokes for a field; the field's mask is applied.
    Edit(Field, String),
    /// Check the form's CPF/CNPJ.
    CheckDocument,
    /// Validate everything and mark the form submitted if it passes.
    Submit,
    /// Clear the form.
    Reset,
}

/// A form record plus its validation state.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormState<F> {
    pub data: F,
    pub errors: FieldErrors,
    pub document: DocumentStatus,
    /// Set by a successful [`Msg::Submit`]; cleared by any edit.
    pub submitted: bool,
}

impl<F: Form> FormState<F> {
    pub fn new(data: F) -> Self {
        Self {
            data,
            errors: FieldErrors::new(),
            document: DocumentStatus::Unchecked,
            submitted: false,
        }
    }

    /// Applies `msg` and returns the next state.
    pub fn update(mut self, msg: Msg) -> Self {
        match msg {
            Msg::Edit(field, raw) => {
                let Some(slot) = self.data.text_mut(field) else {
                    debug!(field = field.name(), "edit ignored: field not on this form");
                    return self;
                };
                *slot = field.mask_kind().apply(&raw);
                self.errors.remove(field);
                self.submitted = false;
                if F::DOCUMENT.is_some_and(|(doc, _)| doc == field) {
                    self.document = DocumentStatus::Unchecked;
                }
            }
            Msg::CheckDocument => {
                let Some((field, kind)) = F::DOCUMENT else {
                    return self;
                };
                let value = self.data.text(field).unwrap_or_default();
                if value.trim().is_empty() {
                    self.document = DocumentStatus::Unchecked;
                    self.errors.insert(field, FieldError::Required);
                } else {
                    match kind.check(value) {
                        Ok(()) => {
                            debug!(%kind, "document valid");
                            self.document = DocumentStatus::Valid;
                            self.errors.remove(field);
                        }
                        Err(error) => {
                            debug!(kind = %error.kind(), %error, "document rejected");
                            self.document = DocumentStatus::Invalid;
                            self.errors.insert(field, FieldError::InvalidDocument { kind });
                        }
                    }
                }
            }
            Msg::Submit => {
                self.errors = self.data.check(self.document);
                self.submitted = self.errors.is_empty();
                debug!(
                    submitted = self.submitted,
                    errors = self.errors.len(),
                    "form submitted"
                );
            }
            Msg::Reset => return Self::new(F::default()),
        }
        self
    }

    /// Applies a sequence of messages.
    pub fn apply_all(self, msgs: impl IntoIterator<Item = Msg>) -> Self {
        msgs.into_iter().fold(self, Self::update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(field: Field, value: &str) -> Msg {
        Msg::Edit(field, value.to_string())
    }

    fn filled_person() -> FormState<PersonForm> {
        FormState::new(PersonForm::default()).apply_all([
            edit(Field::Nome, "João Silva"),
            edit(Field::Cpf, "11144477735"),
            edit(Field::DataNascimento, "2000-05-10"),
            edit(Field::Email, "joao@universidade.br"),
        ])
    }

    #[test]
    fn test_edit_applies_mask() {
        let state = FormState::new(PersonForm::default()).apply_all([
            edit(Field::Cpf, "1114447773599"),
            edit(Field::Telefone, "11987654321"),
            edit(Field::Cep, "01310100"),
        ]);
        assert_eq!(state.data.cpf, "111.444.777-35");
        assert_eq!(state.data.telefone, "(11) 98765-4321");
        assert_eq!(state.data.address.cep, "01310-100");
    }

    #[test]
    fn test_edit_unknown_field_ignored() {
        let state = FormState::new(PersonForm::default()).update(edit(Field::Cnpj, "1"));
        assert_eq!(state, FormState::new(PersonForm::default()));
    }

    #[test]
    fn test_submit_requires_document_check() {
        let state = filled_person().update(Msg::Submit);
        assert!(!state.submitted);
        assert_eq!(
            state.errors.get(Field::Cpf),
            Some(&FieldError::DocumentNotChecked { kind: DocumentKind::Cpf })
        );
        assert_eq!(state.errors.len(), 1);

        let state = state.update(Msg::CheckDocument).update(Msg::Submit);
        assert!(state.submitted, "{:?}", state.errors);
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_editing_document_resets_check() {
        let state = filled_person().update(Msg::CheckDocument);
        assert_eq!(state.document, DocumentStatus::Valid);

        let state = state.update(edit(Field::Cpf, "11144477736"));
        assert_eq!(state.document, DocumentStatus::Unchecked);

        let state = state.update(Msg::CheckDocument);
        assert_eq!(state.document, DocumentStatus::Invalid);
        assert_eq!(
            state.errors.get(Field::Cpf),
            Some(&FieldError::InvalidDocument { kind: DocumentKind::Cpf })
        );
    }

    #[test]
    fn test_editing_other_field_keeps_check() {
        let state = filled_person()
            .update(Msg::CheckDocument)
            .update(edit(Field::Nome, "João da Silva"));
        assert_eq!(state.document, DocumentStatus::Valid);
    }

    #[test]
    fn test_check_empty_document() {
        let state = FormState::new(PersonForm::default()).update(Msg::CheckDocument);
        assert_eq!(state.document, DocumentStatus::Unchecked);
        assert_eq!(state.errors.get(Field::Cpf), Some(&FieldError::Required));
    }

    #[test]
    fn test_submit_empty_reports_required_in_order() {
        let state = FormState::new(PersonForm::default()).update(Msg::Submit);
        let fields: Vec<Field> = state.errors.iter().map(|(f, _)| f).collect();
        assert_eq!(
            fields,
            vec![Field::Nome, Field::Cpf, Field::DataNascimento, Field::Email]
        );
        assert_eq!(state.errors.first(), Some((Field::Nome, &FieldError::Required)));
    }

    #[test]
    fn test_edit_clears_field_error() {
        let state = FormState::new(PersonForm::default())
            .update(Msg::Submit)
            .update(edit(Field::Nome, "Ana"));
        assert!(state.errors.get(Field::Nome).is_none());
        assert!(state.errors.get(Field::Email).is_some());
    }

    #[test]
    fn test_invalid_email_and_partial_fields() {
        let state = filled_person().update(Msg::CheckDocument).apply_all([
            edit(Field::Email, "joao@universidade"),
            edit(Field::Telefone, "1198"),
            edit(Field::Cep, "0131"),
            edit(Field::Estado, "XX"),
            Msg::Submit,
        ]);
        assert!(!state.submitted);
        assert_eq!(state.errors.get(Field::Email), Some(&FieldError::InvalidEmail));
        assert_eq!(state.errors.get(Field::Telefone), Some(&FieldError::Incomplete));
        assert_eq!(state.errors.get(Field::Cep), Some(&FieldError::Incomplete));
        assert_eq!(state.errors.get(Field::Estado), Some(&FieldError::UnknownState));
    }

    #[test]
    fn test_reset() {
        let state = filled_person().update(Msg::CheckDocument).update(Msg::Reset);
        assert_eq!(state, FormState::new(PersonForm::default()));
    }

    #[test]
    fn test_field_error_messages() {
        assert_eq!(FieldError::Required.to_string(), "Campo obrigatório");
        assert_eq!(
            FieldError::DocumentNotChecked { kind: DocumentKind::Cnpj }.to_string(),
            "Por favor, valide o CNPJ antes de salvar"
        );
        assert_eq!(
            FieldError::InvalidDocument { kind: DocumentKind::Cpf }.to_string(),
            "CPF inválido, verifique os dígitos."
        );
    }
}
