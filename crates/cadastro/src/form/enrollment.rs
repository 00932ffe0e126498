//! Student enrollment: form → enrollment code → payment → confirmation.
//!
//! ```text
//! Draft ──enroll──▶ AwaitingPayment ──register_payment──▶ Confirmed
//! ```
//!
//! Course changes are allowed in any stage, subject to vacancies.

use thiserror::Error;
use tracing::debug;

use crate::catalog;
use crate::error::DateParseError;
use crate::form::{DocumentStatus, FieldErrors, Form, StudentForm};
use crate::format::{generate_id, parse_currency, IdConfig};
use crate::util::Date;

/// Tuition suggested when the payment dialog opens.
pub const DEFAULT_TUITION: f64 = 1250.0;

/// A scheduled tuition payment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Payment {
    pub amount: f64,
    pub due_date: Date,
}

/// Where an enrollment is in its flow.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnrollmentStage {
    #[default]
    Draft,
    AwaitingPayment,
    Confirmed(Payment),
}

/// Error in the enrollment flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnrollmentError {
    #[error("Formulário com {} campo(s) inválido(s)", .0.len())]
    InvalidForm(FieldErrors),

    #[error("O curso {course} não possui vagas")]
    NoVacancy { course: &'static str },

    #[error("Curso inexistente: {id:?}")]
    UnknownCourse { id: String },

    #[error("Aluno já matriculado")]
    AlreadyEnrolled,

    #[error("Realize a matrícula antes de registrar o pagamento")]
    NotAwaitingPayment,

    #[error("Valor de pagamento inválido: {input:?}")]
    InvalidAmount { input: String },

    #[error("Data de vencimento inválida: {0}")]
    InvalidDueDate(#[from] DateParseError),

    #[error("O aluno já está no curso {course}")]
    SameCourse { course: &'static str },
}

/// A student going through enrollment.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enrollment {
    pub student: StudentForm,
    pub stage: EnrollmentStage,
}

impl Enrollment {
    pub fn new(student: StudentForm) -> Self {
        Self {
            student,
            stage: EnrollmentStage::Draft,
        }
    }

    /// The generated enrollment code, once enrolled.
    pub fn matricula(&self) -> Option<&str> {
        match self.stage {
            EnrollmentStage::Draft => None,
            _ => Some(&self.student.matricula),
        }
    }

    /// Validates the student form, checks the course has vacancies and
    /// assigns an enrollment code shaped by `config`.
    pub fn enroll(&mut self, config: &IdConfig) -> Result<&str, EnrollmentError> {
        if self.stage != EnrollmentStage::Draft {
            return Err(EnrollmentError::AlreadyEnrolled);
        }

        let errors = self.student.check(DocumentStatus::Unchecked);
        if !errors.is_empty() {
            return Err(EnrollmentError::InvalidForm(errors));
        }
        let course = self.student.course().ok_or_else(|| EnrollmentError::UnknownCourse {
            id: self.student.curso_atual.clone(),
        })?;
        if !course.has_vacancy() {
            return Err(EnrollmentError::NoVacancy { course: course.name });
        }

        self.student.matricula = generate_id(config);
        self.stage = EnrollmentStage::AwaitingPayment;
        debug!(
            matricula = %self.student.matricula,
            course = course.code,
            "student enrolled"
        );
        Ok(&self.student.matricula)
    }

    /// Registers the first tuition payment and confirms the enrollment.
    ///
    /// `amount` is parsed with [`parse_currency`] and must be positive;
    /// `due_date` is `YYYY-MM-DD`.
    pub fn register_payment(
        &mut self,
        amount: &str,
        due_date: &str,
    ) -> Result<Payment, EnrollmentError> {
        if self.stage != EnrollmentStage::AwaitingPayment {
            return Err(EnrollmentError::NotAwaitingPayment);
        }

        let amount = parse_currency(amount)
            .filter(|a| *a > 0.0)
            .ok_or_else(|| EnrollmentError::InvalidAmount {
                input: amount.to_string(),
            })?;
        let due_date = Date::parse_iso(due_date.trim())?;

        let payment = Payment { amount, due_date };
        self.stage = EnrollmentStage::Confirmed(payment);
        debug!(
            matricula = %self.student.matricula,
            amount,
            due_date = %due_date.to_iso(),
            "enrollment confirmed"
        );
        Ok(payment)
    }

    /// Moves the student to another course with open vacancies.
    pub fn change_course(&mut self, course_id: &str) -> Result<(), EnrollmentError> {
        let target = catalog::course_by_id(course_id).ok_or_else(|| {
            EnrollmentError::UnknownCourse {
                id: course_id.to_string(),
            }
        })?;
        if target.id == self.student.curso_atual {
            return Err(EnrollmentError::SameCourse { course: target.name });
        }
        if !target.has_vacancy() {
            return Err(EnrollmentError::NoVacancy { course: target.name });
        }

        debug!(from = %self.student.curso_atual, to = target.id, "course changed");
        self.student.curso_atual = target.id.to_string();
        Ok(())
    }
}
