//! In-memory reference data consulted by the registration forms.
//!
//! Everything here is static demo data; nothing is loaded or persisted.

use std::fmt;

use crate::format::format_currency;
use crate::util::Date;

/// A course students can enroll in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Course {
    pub id: &'static str,
    pub name: &'static str,
    pub code: &'static str,
    /// Open seats; zero means enrollment is closed.
    pub vacancies: u32,
}

impl Course {
    pub fn has_vacancy(&self) -> bool {
        self.vacancies > 0
    }
}

pub const COURSES: &[Course] = &[
    Course { id: "1", name: "Engenharia de Software", code: "ES001", vacancies: 45 },
    Course { id: "2", name: "Administração", code: "ADM001", vacancies: 30 },
    Course { id: "3", name: "Ciência da Computação", code: "CC001", vacancies: 40 },
    Course { id: "4", name: "Direito", code: "DIR001", vacancies: 35 },
    Course { id: "5", name: "Medicina", code: "MED001", vacancies: 0 },
    Course { id: "6", name: "Engenharia Civil", code: "EC001", vacancies: 25 },
    Course { id: "7", name: "Psicologia", code: "PSI001", vacancies: 20 },
    Course { id: "8", name: "Arquitetura", code: "ARQ001", vacancies: 30 },
];

pub const DISCIPLINES: &[&str] = &[
    "Algoritmos e Programação",
    "Banco de Dados",
    "Engenharia de Software",
    "Redes de Computadores",
    "Inteligência Artificial",
    "Cálculo I",
    "Cálculo II",
    "Física I",
    "Física II",
    "Matemática Discreta",
    "Estrutura de Dados",
    "Sistemas Operacionais",
    "Compiladores",
    "Teoria da Computação",
    "Gestão de Projetos",
];

/// Federative unit (state) abbreviations.
pub const STATES: &[&str] = &[
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA",
    "PB", "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// Lifecycle of a supplier contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ContractStatus {
    Active,
    Pending,
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractStatus::Active => f.write_str("Ativo"),
            ContractStatus::Pending => f.write_str("Pendente"),
        }
    }
}

/// A supply contract listed on the supplier screen.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Contract {
    pub id: &'static str,
    pub name: &'static str,
    pub status: ContractStatus,
    pub start: Date,
    pub end: Date,
    /// Total contract value in reais.
    pub value: f64,
}

impl Contract {
    /// The contract value as shown in the list, e.g. `R$ 50.000,00`.
    pub fn formatted_value(&self) -> String {
        format_currency(self.value)
    }

    /// True if `date` falls within the contract term, both ends included.
    pub fn covers(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

pub const CONTRACTS: &[Contract] = &[
    Contract {
        id: "1",
        name: "Fornecimento de Material Didático",
        status: ContractStatus::Active,
        start: Date::ymd(2025, 1, 1),
        end: Date::ymd(2025, 12, 31),
        value: 50_000.0,
    },
    Contract {
        id: "2",
        name: "Manutenção de Equipamentos",
        status: ContractStatus::Active,
        start: Date::ymd(2025, 3, 1),
        end: Date::ymd(2026, 2, 28),
        value: 35_000.0,
    },
    Contract {
        id: "3",
        name: "Fornecimento de Alimentos - Cantina",
        status: ContractStatus::Pending,
        start: Date::ymd(2025, 11, 1),
        end: Date::ymd(2026, 10, 31),
        value: 80_000.0,
    },
];

pub fn contract_by_id(id: &str) -> Option<&'static Contract> {
    CONTRACTS.iter().find(|c| c.id == id)
}

pub fn course_by_id(id: &str) -> Option<&'static Course> {
    COURSES.iter().find(|c| c.id == id)
}

/// Returns true if `uf` is a state abbreviation (case-sensitive).
pub fn is_state(uf: &str) -> bool {
    STATES.iter().any(|s| *s == uf)
}

/// Disciplines whose name contains `query` (case-insensitive), skipping
/// those already in `exclude`.
pub fn search_disciplines(query: &str, exclude: &[String]) -> Vec<&'static str> {
    let query = query.to_lowercase();
    DISCIPLINES
        .iter()
        .copied()
        .filter(|d| d.to_lowercase().contains(&query))
        .filter(|d| !exclude.iter().any(|e| e == d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_lookup() {
        let course = course_by_id("1").unwrap();
        assert_eq!(course.code, "ES001");
        assert!(course.has_vacancy());

        let medicina = course_by_id("5").unwrap();
        assert!(!medicina.has_vacancy());

        assert!(course_by_id("99").is_none());
    }

    #[test]
    fn test_contracts() {
        assert_eq!(CONTRACTS.len(), 3);
        let first = contract_by_id("1").unwrap();
        assert_eq!(first.formatted_value(), "R$ 50.000,00");
        assert_eq!(first.status.to_string(), "Ativo");
        assert_eq!(first.end.to_short_br(), "31/12/2025");

        let cantina = contract_by_id("3").unwrap();
        assert_eq!(cantina.status, ContractStatus::Pending);
        assert_eq!(cantina.status.to_string(), "Pendente");
        assert_eq!(cantina.formatted_value(), "R$ 80.000,00");
        assert!(contract_by_id("9").is_none());

        for contract in CONTRACTS {
            assert!(contract.start < contract.end, "{}", contract.name);
        }
    }

    #[test]
    fn test_contract_term() {
        let maintenance = contract_by_id("2").unwrap();
        assert!(maintenance.covers(Date::from_ymd(2025, 3, 1).unwrap()));
        assert!(maintenance.covers(Date::from_ymd(2026, 2, 28).unwrap()));
        assert!(!maintenance.covers(Date::from_ymd(2026, 3, 1).unwrap()));
        assert!(!maintenance.covers(Date::from_ymd(2025, 2, 28).unwrap()));
    }

    #[test]
    fn test_states() {
        assert_eq!(STATES.len(), 27);
        assert!(is_state("SP"));
        assert!(is_state("DF"));
        assert!(!is_state("sp"));
        assert!(!is_state("XX"));
    }

    #[test]
    fn test_search_disciplines() {
        let found = search_disciplines("cálculo", &[]);
        assert_eq!(found, vec!["Cálculo I", "Cálculo II"]);

        let found = search_disciplines("CÁLCULO", &["Cálculo I".to_string()]);
        assert_eq!(found, vec!["Cálculo II"]);

        assert_eq!(search_disciplines("", &[]).len(), DISCIPLINES.len());
        assert!(search_disciplines("quântica", &[]).is_empty());
    }
}
