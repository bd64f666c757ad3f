use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use shared::domain::{Field, Gender, MaritalStatus};
use tracing_subscriber::EnvFilter;
use wizard_core::{
    config::{load_settings_from, DEFAULT_CONFIG_FILE},
    connect_backend, DocumentAsset, PhotoAsset, RegistrationWizard, SubmissionCoordinator,
};

/// Submit a pre-registration without the desktop window.
#[derive(Parser, Debug)]
#[command(name = "register")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// M or F
    #[arg(long, default_value = "M", value_parser = parse_gender)]
    gender: Gender,
    #[arg(long, default_value = "Célibataire", value_parser = parse_marital_status)]
    marital_status: MaritalStatus,
    /// AAAA-MM-JJ
    #[arg(long)]
    birth_date: String,
    #[arg(long)]
    birth_place: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    previous_school: String,
    #[arg(long)]
    faculty: String,
    #[arg(long)]
    department: String,
    #[arg(long)]
    photo: PathBuf,
    #[arg(long = "document")]
    documents: Vec<PathBuf>,
}

fn parse_gender(raw: &str) -> Result<Gender, String> {
    Gender::from_code(raw).ok_or_else(|| format!("unknown gender '{raw}' (expected M or F)"))
}

fn parse_marital_status(raw: &str) -> Result<MaritalStatus, String> {
    MaritalStatus::parse(raw).ok_or_else(|| {
        let known = MaritalStatus::ALL
            .iter()
            .map(|status| status.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown marital status '{raw}' (expected one of: {known})")
    })
}

/// Drives the wizard up to the documents step with the given answers.
fn fill_wizard(wizard: &mut RegistrationWizard, args: &Args) -> Result<()> {
    for (field, value) in [
        (Field::FirstName, &args.first_name),
        (Field::LastName, &args.last_name),
        (Field::BirthDate, &args.birth_date),
        (Field::BirthPlace, &args.birth_place),
        (Field::Phone, &args.phone),
        (Field::Email, &args.email),
    ] {
        wizard.set_text(field, value.as_str());
    }
    wizard.set_gender(args.gender);
    wizard.set_marital_status(args.marital_status);
    wizard.advance()?;

    wizard.set_text(Field::PreviousSchool, args.previous_school.as_str());
    wizard.set_text(Field::TargetFaculty, args.faculty.as_str());
    wizard.set_text(Field::TargetDepartment, args.department.as_str());
    wizard.advance()?;

    attach_files(wizard, &args.photo, &args.documents)
}

fn attach_files(wizard: &mut RegistrationWizard, photo: &Path, documents: &[PathBuf]) -> Result<()> {
    let photo = PhotoAsset::from_path(photo)?;
    wizard.select_photo(photo)?;

    let documents = documents
        .iter()
        .map(|path| DocumentAsset::from_path(path))
        .collect::<Result<Vec<_>, _>>()?;
    wizard.select_documents(documents)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings_from(&args.config, |name| std::env::var(name).ok());
    let coordinator = SubmissionCoordinator::from_settings(connect_backend(&settings), &settings);

    let mut wizard = RegistrationWizard::default();
    fill_wizard(&mut wizard, &args)?;
    let receipt = wizard
        .submit(&coordinator)
        .await
        .context("la soumission a échoué")?;

    let summary = wizard
        .confirmation_summary()
        .context("registration stored but wizard did not reach confirmation")?;
    println!("Pré-inscription Enregistrée !");
    println!(
        "Merci {}. Votre dossier pour la faculté de {} a été transmis avec succès.",
        summary.applicant_name, summary.program
    );
    println!("photo: {}", receipt.photo_path);
    Ok(())
}
