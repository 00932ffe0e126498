//! Command-line driver for the `cadastro` library.
//!
//! ```text
//! cadastro-demo cpf 111.444.777-35
//! cadastro-demo cnpj 11222333000181
//! cadastro-demo phone 11987654321
//! cadastro-demo currency 1250
//! cadastro-demo enroll "João Silva" joao@universidade.br 1 2025-12-10
//! cadastro-demo teacher "Dra. Beatriz Lima" 1234567 beatriz@uni.br --disciplina Compiladores
//! cadastro-demo invoice "R$ 1.500,00" 2025-11-20 Biblioteca
//! cadastro-demo login admin@universidade.br 123456
//! ```
//!
//! Set `RUST_LOG=debug` to see the library's state transitions.

use std::fmt::Display;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cadastro::catalog::CONTRACTS;
use cadastro::form::{
    Enrollment, LoginForm, StudentForm, SupplierForm, TeacherForm, DEFAULT_TUITION,
};
use cadastro::{
    format_currency, format_date, generate_matricula, mask_cep, mask_cnpj, mask_cpf, mask_phone,
    parse_currency, validate_email, Cnpj, Cpf, Date, DocumentError, IdConfig,
};

/// Masks, validates and formats Brazilian registry data, and runs the
/// registration flows of the university front-end.
#[derive(Parser, Debug)]
#[command(name = "cadastro-demo", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mask and validate a CPF.
    Cpf { input: String },

    /// Mask and validate a CNPJ.
    Cnpj { input: String },

    /// Mask a phone number.
    Phone { input: String },

    /// Mask a CEP.
    Cep { input: String },

    /// Check the shape of an e-mail address.
    Email { input: String },

    /// Format an amount in reais.
    Currency {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Format a `YYYY-MM-DD` date as `dd/mm/yyyy` (today if omitted).
    Date { date: Option<String> },

    /// Generate a student enrollment code.
    Matricula,

    /// Enroll a student and register the first tuition payment.
    Enroll {
        nome: String,
        email: String,
        /// Course id from the catalog.
        course: String,
        /// Payment due date, `YYYY-MM-DD`.
        due_date: String,
        /// Tuition amount [default: 1250].
        #[arg(long)]
        amount: Option<String>,
    },

    /// Register a teacher and assign a teacher code.
    Teacher {
        nome: String,
        siape: String,
        email: String,
        /// Discipline to assign; repeat for more.
        #[arg(long = "disciplina")]
        disciplinas: Vec<String>,
    },

    /// List the supplier contracts.
    Contracts,

    /// Send a supplier invoice to a department.
    Invoice {
        value: String,
        /// Invoice date, `YYYY-MM-DD`.
        date: String,
        department: String,
    },

    /// Sign in through the demo login gate.
    Login {
        email: String,
        password: String,
        #[arg(long)]
        remember_me: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli.command)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Cpf { input } => report_document(mask_cpf(&input), Cpf::parse(&input)),
        Command::Cnpj { input } => {
            report_document(mask_cnpj(&input), Cnpj::parse(&input));
            if let Ok(cnpj) = Cnpj::parse(&input) {
                println!("branch: {:04}", cnpj.branch());
            }
        }
        Command::Phone { input } => println!("{}", mask_phone(&input)),
        Command::Cep { input } => println!("{}", mask_cep(&input)),
        Command::Email { input } => {
            let verdict = if validate_email(&input) { "valid" } else { "invalid" };
            println!("{input}: {verdict}");
        }
        Command::Currency { amount } => {
            let value =
                parse_currency(&amount).ok_or_else(|| anyhow!("not an amount: {amount:?}"))?;
            println!("{}", format_currency(value));
        }
        Command::Date { date } => {
            let date = match date {
                Some(input) => Date::parse_iso(&input)?,
                None => Date::today(),
            };
            println!("{}", format_date(date));
        }
        Command::Matricula => println!("{}", generate_matricula()),
        Command::Enroll {
            nome,
            email,
            course,
            due_date,
            amount,
        } => {
            let amount = amount.unwrap_or_else(|| DEFAULT_TUITION.to_string());
            enroll(nome, email, course, &due_date, &amount)?
        }
        Command::Teacher {
            nome,
            siape,
            email,
            disciplinas,
        } => register_teacher(nome, siape, email, &disciplinas)?,
        Command::Contracts => {
            let today = Date::today();
            for contract in CONTRACTS {
                let current = if contract.covers(today) { "*" } else { " " };
                println!(
                    "{current} {:<40} {:<9} {} - {}  {:>15}",
                    contract.name,
                    contract.status.to_string(),
                    format_date(contract.start),
                    format_date(contract.end),
                    contract.formatted_value()
                );
            }
        }
        Command::Invoice {
            value,
            date,
            department,
        } => {
            let invoice = SupplierForm::default()
                .send_invoice(&value, &date, &department)
                .context("invoice rejected")?;
            info!(department = %invoice.department, "invoice sent");
            println!("{}", serde_json::to_string_pretty(&invoice)?);
        }
        Command::Login {
            email,
            password,
            remember_me,
        } => {
            let form = LoginForm {
                remember_me,
                ..LoginForm::new(email, password)
            };
            let session = form.authenticate()?;
            info!(email = %session.email, "signed in");
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
    }
    Ok(())
}

fn report_document<T: Display>(masked: String, parsed: Result<T, DocumentError>) {
    println!("masked: {masked}");
    match parsed {
        Ok(value) => println!("valid:  {value}"),
        Err(e) => {
            warn!(kind = %e.kind(), "document rejected");
            println!("invalid: {e}");
        }
    }
}

/// Runs the full enrollment flow and prints the resulting state as JSON.
fn enroll(
    nome: String,
    email: String,
    course: String,
    due_date: &str,
    amount: &str,
) -> Result<()> {
    let student = StudentForm {
        nome,
        email,
        curso_atual: course,
        ..Default::default()
    };

    let mut enrollment = Enrollment::new(student);
    let matricula = enrollment
        .enroll(&IdConfig::matricula())
        .context("enrollment rejected")?
        .to_string();
    info!(%matricula, "student enrolled");

    let payment = enrollment
        .register_payment(amount, due_date)
        .context("payment rejected")?;
    info!(
        amount = %format_currency(payment.amount),
        due = %format_date(payment.due_date),
        "payment scheduled"
    );

    println!("{}", serde_json::to_string_pretty(&enrollment)?);
    Ok(())
}

fn register_teacher(
    nome: String,
    siape: String,
    email: String,
    disciplinas: &[String],
) -> Result<()> {
    let mut form = TeacherForm {
        nome,
        siape,
        email,
        ..Default::default()
    };
    for name in disciplinas {
        if !form.add_discipline(name) {
            bail!("unknown or repeated discipline {name:?}");
        }
    }

    let codigo = match form.register(&IdConfig::professor()) {
        Ok(codigo) => codigo.to_string(),
        Err(errors) => {
            let details: Vec<String> = errors
                .iter()
                .map(|(field, error)| format!("{}: {error}", field.name()))
                .collect();
            bail!("teacher rejected: {}", details.join(", "));
        }
    };
    info!(%codigo, "teacher registered");
    println!("{}", serde_json::to_string_pretty(&form)?);
    Ok(())
}
