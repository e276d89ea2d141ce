//! Command-line surface and the handlers behind each sub-command.

use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use docvault_core::domain::{Document, DocumentCategory, DocumentListItem, DocumentStats, FileUpload, User};
use docvault_shared::dto::{LoginCredentials, RegisterData};
use docvault_shared::format::{format_date, format_file_size, format_relative_date, sanitize_file_name, truncate_text};
use docvault_shared::messages::{error as err_msg, success};
use docvault_shared::validation::{is_valid_email, validate_file, validate_password};

use crate::state::AppState;

const PREVIEW_LEN: usize = 200;

#[derive(Parser, Debug)]
#[command(name = "docvault", version, about = "DocVault document classification client")]
pub struct Cli {
    /// API root URL.
    #[arg(long, global = true, env = "DOCVAULT_API_URL")]
    pub api_url: Option<String>,

    /// Session file location.
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "DOCVAULT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "DOCVAULT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Browse and manage your documents.
    Documents(DocumentsCommand),
}

#[derive(Args, Debug)]
pub struct DocumentsCommand {
    #[command(subcommand)]
    pub command: DocumentsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DocumentsSubcommand {
    /// List documents, newest first.
    List {
        /// math, algo, histoire or autres
        #[arg(long)]
        category: Option<DocumentCategory>,
    },
    /// Show one document with its keywords and preview.
    Show {
        id: u64,
    },
    /// Upload a PDF, DOCX or PPTX file for classification.
    Upload {
        path: PathBuf,
        /// Defaults to the file name without extension.
        #[arg(long)]
        title: Option<String>,
    },
    /// Delete a document.
    Delete {
        id: u64,
    },
    /// Count documents per category.
    Stats,
    /// Save every document as one zip archive.
    DownloadZip {
        #[arg(long, short, default_value = "documents.zip")]
        output: PathBuf,
    },
}

pub async fn run(command: Command, state: &AppState) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => login(state, email, password).await,
        Command::Register {
            username,
            email,
            password,
        } => register(state, username, email, password).await,
        Command::Logout => {
            state.auth.logout().await;
            println!("{}", success::LOGOUT_SUCCESS);
            Ok(())
        }
        Command::Whoami => whoami(state).await,
        Command::Documents(docs) => {
            ensure_signed_in(state).await?;
            documents(state, docs.command).await
        }
    }
}

/// Check the stored session; true when a guest may proceed.
async fn ensure_guest(state: &AppState) -> bool {
    state.auth.bootstrap().await;
    if state.auth.require_guest() {
        return true;
    }
    if let Some(user) = state.auth.state().user {
        println!("Déjà connecté en tant que {} <{}>.", user.username, user.email);
    }
    false
}

async fn ensure_signed_in(state: &AppState) -> anyhow::Result<()> {
    state.auth.bootstrap().await;
    if !state.auth.require_auth() {
        bail!(err_msg::UNAUTHORIZED);
    }
    Ok(())
}

async fn login(state: &AppState, email: String, password: String) -> anyhow::Result<()> {
    if !is_valid_email(&email) {
        bail!("Adresse email invalide: {email}");
    }
    if !ensure_guest(state).await {
        return Ok(());
    }

    let message = state
        .auth
        .login(&LoginCredentials::new(email, password))
        .await?;

    println!("{message}");
    if let Some(user) = state.auth.state().user {
        print_user(&user);
    }
    Ok(())
}

async fn register(
    state: &AppState,
    username: String,
    email: String,
    password: String,
) -> anyhow::Result<()> {
    if !is_valid_email(&email) {
        bail!("Adresse email invalide: {email}");
    }
    validate_password(&password)?;
    if !ensure_guest(state).await {
        return Ok(());
    }

    let data = RegisterData {
        username,
        email,
        password_confirm: password.clone(),
        password,
    };
    let message = state.auth.register(&data).await?;

    println!("{message}");
    if let Some(user) = state.auth.state().user {
        print_user(&user);
    }
    Ok(())
}

async fn whoami(state: &AppState) -> anyhow::Result<()> {
    state.auth.bootstrap().await;
    match state.auth.state().user {
        Some(user) => {
            print_user(&user);
            Ok(())
        }
        None => bail!("Non connecté."),
    }
}

async fn documents(state: &AppState, command: DocumentsSubcommand) -> anyhow::Result<()> {
    match command {
        DocumentsSubcommand::List { category } => {
            state.documents.load_documents(category).await;
            let current = state.documents.state();
            if let Some(error) = current.error {
                bail!(error);
            }
            print_list(&current.documents);
        }
        DocumentsSubcommand::Show { id } => {
            let document = state.client.get_document(id).await?;
            print_document(&document);
        }
        DocumentsSubcommand::Upload { path, title } => {
            let file = FileUpload::from_path(&path)
                .await
                .with_context(|| format!("Lecture impossible: {}", path.display()))?;
            validate_file(&file.candidate())?;

            let document = state
                .documents
                .upload_document(file, title)
                .await
                .context(err_msg::UPLOAD_ERROR)?;

            println!("{}", success::UPLOAD_SUCCESS);
            print_document(&document);
        }
        DocumentsSubcommand::Delete { id } => {
            state
                .documents
                .delete_document(id)
                .await
                .context(err_msg::DELETE_ERROR)?;
            println!("{}", success::DELETE_SUCCESS);
        }
        DocumentsSubcommand::Stats => {
            let stats = state.client.get_document_stats().await?;
            print_stats(&stats);
        }
        DocumentsSubcommand::DownloadZip { output } => {
            let archive = state.documents.download_zip().await?;
            let output = sanitize_output(output);
            tokio::fs::write(&output, &archive)
                .await
                .with_context(|| format!("Écriture impossible: {}", output.display()))?;
            println!(
                "Archive enregistrée: {} ({})",
                output.display(),
                format_file_size(archive.len() as u64)
            );
        }
    }
    Ok(())
}

/// Sanitize the file name part of the output path, keeping its directory.
fn sanitize_output(output: PathBuf) -> PathBuf {
    match output.file_name().and_then(|n| n.to_str()) {
        Some(name) => output.with_file_name(sanitize_file_name(name)),
        None => output,
    }
}

fn print_user(user: &User) {
    println!("{} <{}>", user.username, user.email);
    println!(
        "Membre depuis le {}",
        format_date(&user.date_joined.with_timezone(&Local))
    );
}

fn print_list(documents: &[DocumentListItem]) {
    if documents.is_empty() {
        println!("Aucun document.");
        return;
    }
    for doc in documents {
        println!(
            "{:>6}  {:<40}  {:<10}  {:>8}  {}",
            doc.id,
            truncate_text(&doc.title, 40),
            doc.category.label(),
            format_file_size(doc.file_size),
            format_relative_date(&doc.created_at),
        );
    }
}

fn print_document(doc: &Document) {
    let info = doc.category.info();
    println!("#{} {}", doc.id, doc.title);
    println!("  Fichier    : {} ({}, {})", doc.file_name, doc.file_type, format_file_size(doc.file_size));
    println!("  Catégorie  : {} {}", info.icon, info.label);
    println!("  Ajouté le  : {}", format_date(&doc.created_at.with_timezone(&Local)));
    if !doc.keywords.is_empty() {
        println!("  Mots-clés  : {}", doc.keywords.join(", "));
    }
    if !doc.content_preview.is_empty() {
        println!("  Aperçu     : {}", truncate_text(&doc.content_preview, PREVIEW_LEN));
    }
    println!("  URL        : {}", doc.file);
}

fn print_stats(stats: &DocumentStats) {
    println!("Total: {} document(s)", stats.total_documents);
    for category in DocumentCategory::ALL {
        let info = category.info();
        println!(
            "  {} {:<10} {}",
            info.icon,
            info.label,
            stats.categories.get(category)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_every_subcommand_has_help() {
        let cli = Cli::command();
        let documents = cli
            .find_subcommand("documents")
            .expect("documents subcommand");
        assert!(documents.get_about().is_some());
        for sub in documents.get_subcommands() {
            assert!(sub.get_about().is_some(), "{} has no help", sub.get_name());
        }
    }

    #[test]
    fn test_parses_category_filter() {
        let cli = Cli::try_parse_from(["docvault", "documents", "list", "--category", "Histoire"])
            .unwrap();
        match cli.command {
            Command::Documents(DocumentsCommand {
                command: DocumentsSubcommand::List { category },
            }) => assert_eq!(category, Some(DocumentCategory::Histoire)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_category() {
        let parsed =
            Cli::try_parse_from(["docvault", "documents", "list", "--category", "physique"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "docvault",
            "whoami",
            "--api-url",
            "https://docs.example.com/api",
            "--session-file",
            "/tmp/s.json",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("https://docs.example.com/api"));
        assert_eq!(cli.session_file, Some(PathBuf::from("/tmp/s.json")));
    }

    #[test]
    fn test_sanitize_output_keeps_directory() {
        let out = sanitize_output(PathBuf::from("exports/mes docs?.zip"));
        assert_eq!(out.parent(), Some(std::path::Path::new("exports")));
        assert_ne!(out.file_name().unwrap(), "mes docs?.zip");
    }
}
