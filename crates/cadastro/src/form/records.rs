//! The registration form records.

use tracing::debug;
use uuid::Uuid;

use crate::catalog::{self, Course};
use crate::document::DocumentKind;
use crate::form::{common_checks, DocumentStatus, Field, FieldError, FieldErrors, Form};
use crate::format::{generate_id, parse_currency, IdConfig};
use crate::util::Date;

/// Postal address block shared by several forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    pub rua: String,
    pub numero: String,
    pub complemento: String,
    pub cep: String,
    pub cidade: String,
    /// State abbreviation, e.g. `SP`.
    pub estado: String,
}

impl Address {
    fn text(&self, field: Field) -> Option<&str> {
        let value: &str = match field {
            Field::Rua => &self.rua,
            Field::Numero => &self.numero,
            Field::Complemento => &self.complemento,
            Field::Cep => &self.cep,
            Field::Cidade => &self.cidade,
            Field::Estado => &self.estado,
            _ => return None,
        };
        Some(value)
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Rua => Some(&mut self.rua),
            Field::Numero => Some(&mut self.numero),
            Field::Complemento => Some(&mut self.complemento),
            Field::Cep => Some(&mut self.cep),
            Field::Cidade => Some(&mut self.cidade),
            Field::Estado => Some(&mut self.estado),
            _ => None,
        }
    }
}

/// Rejects a filled `field` whose value `parses` refuses.
fn check_filled(
    errors: &mut FieldErrors,
    field: Field,
    value: &str,
    parses: impl FnOnce(&str) -> bool,
) {
    let value = value.trim();
    if !value.is_empty() && !parses(value) && errors.get(field).is_none() {
        errors.insert(field, FieldError::InvalidValue);
    }
}

// =============================================================================
// PESSOA FÍSICA
// =============================================================================

/// Individual person registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonForm {
    pub nome: String,
    pub cpf: String,
    /// `YYYY-MM-DD`.
    pub data_nascimento: String,
    pub email: String,
    pub telefone: String,
    pub address: Address,
    /// Role at the university (student, staff, ...), free text.
    pub papel: String,
}

impl Form for PersonForm {
    const DOCUMENT: Option<(Field, DocumentKind)> = Some((Field::Cpf, DocumentKind::Cpf));
    const REQUIRED: &'static [Field] =
        &[Field::Nome, Field::Cpf, Field::DataNascimento, Field::Email];

    fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Nome => Some(&self.nome),
            Field::Cpf => Some(&self.cpf),
            Field::DataNascimento => Some(&self.data_nascimento),
            Field::Email => Some(&self.email),
            Field::Telefone => Some(&self.telefone),
            Field::Papel => Some(&self.papel),
            _ => self.address.text(field),
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Nome => Some(&mut self.nome),
            Field::Cpf => Some(&mut self.cpf),
            Field::DataNascimento => Some(&mut self.data_nascimento),
            Field::Email => Some(&mut self.email),
            Field::Telefone => Some(&mut self.telefone),
            Field::Papel => Some(&mut self.papel),
            _ => self.address.text_mut(field),
        }
    }

    fn check(&self, document: DocumentStatus) -> FieldErrors {
        let mut errors = common_checks(self, document);
        check_filled(&mut errors, Field::DataNascimento, &self.data_nascimento, |v| {
            Date::parse_iso(v).is_ok()
        });
        errors
    }
}

// =============================================================================
// PESSOA JURÍDICA
// =============================================================================

/// Company registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompanyForm {
    pub razao_social: String,
    pub nome_fantasia: String,
    pub cnpj: String,
    pub email: String,
    pub telefone: String,
    pub address: Address,
    /// The company issues invoices (nota fiscal); requires a municipal
    /// registration number.
    pub emitir_nota_fiscal: bool,
    pub inscricao_municipal: String,
    pub inscricao_estadual: String,
}

impl Form for CompanyForm {
    const DOCUMENT: Option<(Field, DocumentKind)> = Some((Field::Cnpj, DocumentKind::Cnpj));
    const REQUIRED: &'static [Field] = &[Field::RazaoSocial, Field::Cnpj, Field::Email];

    fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::RazaoSocial => Some(&self.razao_social),
            Field::NomeFantasia => Some(&self.nome_fantasia),
            Field::Cnpj => Some(&self.cnpj),
            Field::Email => Some(&self.email),
            Field::Telefone => Some(&self.telefone),
            Field::InscricaoMunicipal => Some(&self.inscricao_municipal),
            Field::InscricaoEstadual => Some(&self.inscricao_estadual),
            _ => self.address.text(field),
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::RazaoSocial => Some(&mut self.razao_social),
            Field::NomeFantasia => Some(&mut self.nome_fantasia),
            Field::Cnpj => Some(&mut self.cnpj),
            Field::Email => Some(&mut self.email),
            Field::Telefone => Some(&mut self.telefone),
            Field::InscricaoMunicipal => Some(&mut self.inscricao_municipal),
            Field::InscricaoEstadual => Some(&mut self.inscricao_estadual),
            _ => self.address.text_mut(field),
        }
    }

    fn check(&self, document: DocumentStatus) -> FieldErrors {
        let mut errors = common_checks(self, document);
        if self.emitir_nota_fiscal && self.inscricao_municipal.trim().is_empty() {
            errors.insert(Field::InscricaoMunicipal, FieldError::Required);
        }
        errors
    }
}

// =============================================================================
// ALUNO
// =============================================================================

/// Student registration.
///
/// `matricula` is filled in by [`Enrollment`](crate::form::Enrollment), not
/// typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudentForm {
    pub nome: String,
    pub matricula: String,
    pub email: String,
    pub telefone: String,
    /// Course id from [`catalog::COURSES`].
    pub curso_atual: String,
    pub historico: String,
    /// Attendance percentage, 0-100.
    pub frequencia: String,
    pub metodo_pagamento: String,
    pub observacoes: String,
}

impl StudentForm {
    /// The selected course, if it exists in the catalog.
    pub fn course(&self) -> Option<&'static Course> {
        catalog::course_by_id(&self.curso_atual)
    }
}

impl Form for StudentForm {
    const DOCUMENT: Option<(Field, DocumentKind)> = None;
    const REQUIRED: &'static [Field] = &[Field::Nome, Field::Email, Field::CursoAtual];

    fn text(&self, field: Field) -> Option<&str> {
        let value: &str = match field {
            Field::Nome => &self.nome,
            Field::Matricula => &self.matricula,
            Field::Email => &self.email,
            Field::Telefone => &self.telefone,
            Field::CursoAtual => &self.curso_atual,
            Field::Historico => &self.historico,
            Field::Frequencia => &self.frequencia,
            Field::MetodoPagamento => &self.metodo_pagamento,
            Field::Observacoes => &self.observacoes,
            _ => return None,
        };
        Some(value)
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Nome => Some(&mut self.nome),
            Field::Matricula => Some(&mut self.matricula),
            Field::Email => Some(&mut self.email),
            Field::Telefone => Some(&mut self.telefone),
            Field::CursoAtual => Some(&mut self.curso_atual),
            Field::Historico => Some(&mut self.historico),
            Field::Frequencia => Some(&mut self.frequencia),
            Field::MetodoPagamento => Some(&mut self.metodo_pagamento),
            Field::Observacoes => Some(&mut self.observacoes),
            _ => None,
        }
    }

    fn check(&self, document: DocumentStatus) -> FieldErrors {
        let mut errors = common_checks(self, document);
        if !self.curso_atual.trim().is_empty() && self.course().is_none() {
            errors.insert(Field::CursoAtual, FieldError::UnknownCourse);
        }
        check_filled(&mut errors, Field::Frequencia, &self.frequencia, |v| {
            v.trim_end_matches('%')
                .trim()
                .parse::<f64>()
                .is_ok_and(|p| (0.0..=100.0).contains(&p))
        });
        errors
    }
}

// =============================================================================
// PROFESSOR
// =============================================================================

/// Teacher registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeacherForm {
    pub nome: String,
    pub siape: String,
    pub email: String,
    pub telefone: String,
    /// Weekly workload in hours.
    pub carga_horaria: String,
    pub address: Address,
    /// Names from [`catalog::DISCIPLINES`], in selection order.
    pub disciplinas: Vec<String>,
    /// Teacher code assigned by [`TeacherForm::register`].
    pub codigo: String,
}

impl TeacherForm {
    /// Checks the form and assigns a teacher code shaped by `config`
    /// (normally [`IdConfig::professor`]). A registered teacher keeps
    /// the code it already has.
    pub fn register(&mut self, config: &IdConfig) -> Result<&str, FieldErrors> {
        let errors = self.check(DocumentStatus::Unchecked);
        if !errors.is_empty() {
            return Err(errors);
        }
        if self.codigo.is_empty() {
            self.codigo = generate_id(config);
            debug!(codigo = %self.codigo, disciplinas = self.disciplinas.len(), "teacher registered");
        }
        Ok(&self.codigo)
    }

    /// Adds a catalog discipline. Returns false for unknown or
    /// already-selected names.
    pub fn add_discipline(&mut self, name: &str) -> bool {
        let known = catalog::DISCIPLINES.iter().any(|d| *d == name);
        if !known || self.disciplinas.iter().any(|d| d == name) {
            return false;
        }
        self.disciplinas.push(name.to_string());
        true
    }

    pub fn remove_discipline(&mut self, name: &str) -> bool {
        let before = self.disciplinas.len();
        self.disciplinas.retain(|d| d != name);
        self.disciplinas.len() != before
    }

    /// Catalog disciplines matching `query` that aren't selected yet.
    pub fn available_disciplines(&self, query: &str) -> Vec<&'static str> {
        catalog::search_disciplines(query, &self.disciplinas)
    }
}

impl Form for TeacherForm {
    const DOCUMENT: Option<(Field, DocumentKind)> = None;
    const REQUIRED: &'static [Field] = &[Field::Nome, Field::Siape, Field::Email];

    fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Nome => Some(&self.nome),
            Field::Siape => Some(&self.siape),
            Field::Email => Some(&self.email),
            Field::Telefone => Some(&self.telefone),
            Field::CargaHoraria => Some(&self.carga_horaria),
            _ => self.address.text(field),
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Nome => Some(&mut self.nome),
            Field::Siape => Some(&mut self.siape),
            Field::Email => Some(&mut self.email),
            Field::Telefone => Some(&mut self.telefone),
            Field::CargaHoraria => Some(&mut self.carga_horaria),
            _ => self.address.text_mut(field),
        }
    }

    fn check(&self, document: DocumentStatus) -> FieldErrors {
        let mut errors = common_checks(self, document);
        check_filled(&mut errors, Field::CargaHoraria, &self.carga_horaria, |v| {
            v.parse::<u32>().is_ok()
        });
        errors
    }
}

// =============================================================================
// FORNECEDOR
// =============================================================================

/// A product offered by a supplier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

/// An invoice sent by a supplier to a university department.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Invoice {
    pub amount: f64,
    pub date: Date,
    pub department: String,
}

/// Supplier registration.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupplierForm {
    pub nome: String,
    pub cnpj: String,
    pub email: String,
    pub telefone: String,
    pub address: Address,
    pub products: Vec<Product>,
}

impl SupplierForm {
    /// Adds a product from the values typed into the product dialog.
    ///
    /// All three values are required; `price` accepts anything
    /// [`parse_currency`] does and must not be negative. Returns the new
    /// product's id.
    pub fn add_product(
        &mut self,
        name: &str,
        price: &str,
        stock: &str,
    ) -> Result<String, FieldError> {
        let name = name.trim();
        if name.is_empty() || price.trim().is_empty() || stock.trim().is_empty() {
            return Err(FieldError::Required);
        }
        let price = parse_currency(price)
            .filter(|p| *p >= 0.0)
            .ok_or(FieldError::InvalidValue)?;
        let stock: u32 = stock.trim().parse().map_err(|_| FieldError::InvalidValue)?;

        let id = Uuid::new_v4().to_string();
        self.products.push(Product {
            id: id.clone(),
            name: name.to_string(),
            price,
            stock,
        });
        Ok(id)
    }

    /// Builds an invoice from the values typed into the invoice dialog.
    ///
    /// All three values are required. `value` must be a positive amount
    /// ([`parse_currency`]) and `date` a `YYYY-MM-DD` date.
    pub fn send_invoice(
        &self,
        value: &str,
        date: &str,
        department: &str,
    ) -> Result<Invoice, FieldError> {
        let department = department.trim();
        if value.trim().is_empty() || date.trim().is_empty() || department.is_empty() {
            return Err(FieldError::Required);
        }
        let amount = parse_currency(value)
            .filter(|a| *a > 0.0)
            .ok_or(FieldError::InvalidValue)?;
        let date = Date::parse_iso(date.trim()).map_err(|_| FieldError::InvalidValue)?;

        debug!(supplier = %self.nome, amount, department, "invoice sent");
        Ok(Invoice {
            amount,
            date,
            department: department.to_string(),
        })
    }

    pub fn remove_product(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }

    /// Total value of the listed stock.
    pub fn stock_value(&self) -> f64 {
        self.products
            .iter()
            .map(|p| p.price * f64::from(p.stock))
            .sum()
    }
}

impl Form for SupplierForm {
    const DOCUMENT: Option<(Field, DocumentKind)> = Some((Field::Cnpj, DocumentKind::Cnpj));
    const REQUIRED: &'static [Field] = &[Field::Nome, Field::Cnpj, Field::Email];

    fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Nome => Some(&self.nome),
            Field::Cnpj => Some(&self.cnpj),
            Field::Email => Some(&self.email),
            Field::Telefone => Some(&self.telefone),
            _ => self.address.text(field),
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Nome => Some(&mut self.nome),
            Field::Cnpj => Some(&mut self.cnpj),
            Field::Email => Some(&mut self.email),
            Field::Telefone => Some(&mut self.telefone),
            _ => self.address.text_mut(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormState, Msg};

    fn edit(field: Field, value: &str) -> Msg {
        Msg::Edit(field, value.to_string())
    }

    #[test]
    fn test_person_birth_date_must_parse() {
        let form = PersonForm {
            nome: "Ana".into(),
            cpf: "111.444.777-35".into(),
            data_nascimento: "31/02/2000".into(),
            email: "ana@x.com".into(),
            ..Default::default()
        };
        let errors = form.check(DocumentStatus::Valid);
        assert_eq!(errors.get(Field::DataNascimento), Some(&FieldError::InvalidValue));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_company_flow() {
        let state = FormState::new(CompanyForm::default()).apply_all([
            edit(Field::RazaoSocial, "Consultoria XYZ Ltda"),
            edit(Field::Cnpj, "11222333000181"),
            edit(Field::Email, "contato@xyz.com.br"),
            edit(Field::Cep, "01310-100"),
            edit(Field::Estado, "SP"),
            Msg::CheckDocument,
            Msg::Submit,
        ]);
        assert_eq!(state.data.cnpj, "11.222.333/0001-81");
        assert!(state.submitted, "{:?}", state.errors);
    }

    #[test]
    fn test_company_invoice_needs_municipal_registration() {
        let form = CompanyForm {
            razao_social: "ACME".into(),
            cnpj: "11.222.333/0001-81".into(),
            email: "a@acme.com".into(),
            emitir_nota_fiscal: true,
            ..Default::default()
        };
        let errors = form.check(DocumentStatus::Valid);
        assert_eq!(errors.get(Field::InscricaoMunicipal), Some(&FieldError::Required));
    }

    #[test]
    fn test_company_has_no_cpf_field() {
        let state = FormState::new(CompanyForm::default()).update(edit(Field::Cpf, "123"));
        assert_eq!(state.data, CompanyForm::default());
    }

    #[test]
    fn test_student_course_checks() {
        let mut form = StudentForm {
            nome: "Pedro".into(),
            email: "pedro@x.com".into(),
            curso_atual: "42".into(),
            frequencia: "101".into(),
            ..Default::default()
        };
        let errors = form.check(DocumentStatus::Unchecked);
        assert_eq!(errors.get(Field::CursoAtual), Some(&FieldError::UnknownCourse));
        assert_eq!(errors.get(Field::Frequencia), Some(&FieldError::InvalidValue));

        form.curso_atual = "2".into();
        form.frequencia = "87,5%".into();
        assert!(form.check(DocumentStatus::Unchecked).get(Field::Frequencia).is_some());

        form.frequencia = "87.5%".into();
        assert!(form.check(DocumentStatus::Unchecked).is_empty());
        assert_eq!(form.course().map(|c| c.code), Some("ADM001"));
    }

    #[test]
    fn test_teacher_disciplines() {
        let mut form = TeacherForm::default();
        assert!(form.add_discipline("Banco de Dados"));
        assert!(!form.add_discipline("Banco de Dados"));
        assert!(!form.add_discipline("Astrologia"));
        assert!(form.add_discipline("Compiladores"));
        assert_eq!(form.disciplinas, vec!["Banco de Dados", "Compiladores"]);

        assert!(!form.available_disciplines("dados").contains(&"Banco de Dados"));
        assert!(form.available_disciplines("dados").contains(&"Estrutura de Dados"));

        assert!(form.remove_discipline("Banco de Dados"));
        assert!(!form.remove_discipline("Banco de Dados"));
        assert_eq!(form.disciplinas, vec!["Compiladores"]);
    }

    #[test]
    fn test_teacher_workload() {
        let form = TeacherForm {
            nome: "Dra. Beatriz Lima".into(),
            siape: "1234567".into(),
            email: "beatriz@uni.br".into(),
            carga_horaria: "quarenta".into(),
            ..Default::default()
        };
        let errors = form.check(DocumentStatus::Unchecked);
        assert_eq!(errors.get(Field::CargaHoraria), Some(&FieldError::InvalidValue));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_supplier_products() {
        let mut form = SupplierForm::default();
        let id = form
            .add_product("Livro - Fundamentos de Programação", "89,90", "150")
            .unwrap();
        let other = form.add_product("Apostila", "45.00", "200").unwrap();
        assert_ne!(id, other);
        assert_eq!(form.products[0].id, id);
        assert_eq!(form.products[1].name, "Apostila");
        assert_eq!(form.products[1].stock, 200);

        assert_eq!(form.add_product("", "1", "1"), Err(FieldError::Required));
        assert_eq!(form.add_product("X", "-1", "1"), Err(FieldError::InvalidValue));
        assert_eq!(form.add_product("X", "1", "1.5"), Err(FieldError::InvalidValue));
        assert_eq!(form.products.len(), 2);

        assert!((form.stock_value() - (89.9 * 150.0 + 45.0 * 200.0)).abs() < 1e-6);

        assert!(form.remove_product(&id));
        assert!(!form.remove_product(&id));
        assert_eq!(form.products.len(), 1);
    }

    #[test]
    fn test_teacher_register_assigns_code() {
        let mut form = TeacherForm {
            nome: "Dra. Beatriz Lima".into(),
            siape: "1234567".into(),
            email: "beatriz@uni.br".into(),
            carga_horaria: "40".into(),
            ..Default::default()
        };
        form.add_discipline("Compiladores");

        let code = form.register(&IdConfig::professor()).unwrap().to_string();
        assert_eq!(code.len(), 8);
        assert!(code.starts_with("PROF"));
        assert!(code[4..].bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(form.codigo, code);

        // Registering again keeps the code.
        assert_eq!(form.register(&IdConfig::professor()).unwrap(), code);
    }

    #[test]
    fn test_teacher_register_rejects_invalid_form() {
        let mut form = TeacherForm {
            nome: "Carlos".into(),
            email: "carlos@uni".into(),
            ..Default::default()
        };
        let errors = form.register(&IdConfig::professor()).unwrap_err();
        assert_eq!(errors.get(Field::Siape), Some(&FieldError::Required));
        assert_eq!(errors.get(Field::Email), Some(&FieldError::InvalidEmail));
        assert!(form.codigo.is_empty());
    }

    #[test]
    fn test_supplier_invoice() {
        let form = SupplierForm {
            nome: "Editora Academic Press".into(),
            ..Default::default()
        };
        let invoice = form
            .send_invoice("R$ 1.500,00", "2025-11-20", " Biblioteca ")
            .unwrap();
        assert_eq!(invoice.amount, 1500.0);
        assert_eq!(invoice.date, Date::from_ymd(2025, 11, 20).unwrap());
        assert_eq!(invoice.department, "Biblioteca");
    }

    #[test]
    fn test_supplier_invoice_requires_every_value() {
        let form = SupplierForm::default();
        assert_eq!(form.send_invoice("", "2025-11-20", "TI"), Err(FieldError::Required));
        assert_eq!(form.send_invoice("100", "", "TI"), Err(FieldError::Required));
        assert_eq!(form.send_invoice("100", "2025-11-20", "  "), Err(FieldError::Required));
        assert_eq!(form.send_invoice("0", "2025-11-20", "TI"), Err(FieldError::InvalidValue));
        assert_eq!(form.send_invoice("abc", "2025-11-20", "TI"), Err(FieldError::InvalidValue));
        assert_eq!(form.send_invoice("100", "20/11/2025", "TI"), Err(FieldError::InvalidValue));
    }

    #[test]
    fn test_supplier_document_check() {
        let state = FormState::new(SupplierForm::default()).apply_all([
            edit(Field::Nome, "Editora Academic Press"),
            edit(Field::Cnpj, "11.222.333/0001-80"),
            edit(Field::Email, "vendas@academic.com"),
            Msg::CheckDocument,
            Msg::Submit,
        ]);
        assert!(!state.submitted);
        assert_eq!(
            state.errors.get(Field::Cnpj),
            Some(&FieldError::InvalidDocument { kind: DocumentKind::Cnpj })
        );
    }
}
