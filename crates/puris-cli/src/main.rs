use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use puris_client::{BackendClient, HttpGateway, Settings};
use puris_forms::options::{reaction_partners, unit_options};
use puris_forms::{
    settle_notification, FormRecord, FormsConfig, GatewayError, Modal, ModalMode,
    PersistenceGateway, Severity, SubmitOutcome, Validate, ValidationReport,
};
use puris_model::{
    DemandCapacityNotification, Delivery, MaterialStock, NotificationField, Partner,
    ProductStock, Production, StockKind,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "puris", version, about = "PURIS supply-chain data exchange client")]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, env = "PURIS_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Planned deliveries
    Deliveries {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Planned productions
    Productions {
        #[command(subcommand)]
        action: ProductionAction,
    },
    /// Demand and capacity notifications
    Notifications {
        #[command(subcommand)]
        action: NotificationAction,
    },
    /// Business partners
    Partners {
        #[command(subcommand)]
        action: PartnerAction,
    },
    /// Materials known to the backend
    Materials,
    /// Units of measurement accepted in drafts
    Units,
    /// Stock views
    Stocks {
        #[command(subcommand)]
        action: StockAction,
    },
    /// Connector monitoring
    Edc {
        #[command(subcommand)]
        action: EdcAction,
    },
}

#[derive(Debug, Subcommand)]
enum RecordAction {
    /// List own records of a material
    List {
        #[arg(long)]
        material: String,
        /// Partner BPNL (deliveries) or site BPNS (productions)
        #[arg(long)]
        partner: Option<String>,
        /// Records reported by partners instead of own ones (deliveries only)
        #[arg(long)]
        reported: bool,
    },
    /// Create a record from a JSON draft
    Create(FileArg),
    /// Update a record from its JSON form
    Edit(FileArg),
    /// Delete a record by identifier
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Debug, Subcommand)]
enum ProductionAction {
    #[command(flatten)]
    Record(RecordAction),
    /// Create several productions from a JSON array in one request
    CreateRange(FileArg),
}

#[derive(Debug, Subcommand)]
enum NotificationAction {
    /// List notifications with partner names
    List,
    /// Create a notification from a JSON draft
    Create(FileArg),
    /// Update a notification from its JSON form
    Edit(FileArg),
    /// Answer an existing notification
    React {
        /// Identifier of the notification answered
        #[arg(long)]
        origin: Uuid,
        /// Partner the reaction is sent to
        #[arg(long)]
        partner: String,
        /// Affected material numbers
        #[arg(long, value_delimiter = ',')]
        materials: Vec<String>,
        /// Affected sites of the recipient
        #[arg(long, value_delimiter = ',')]
        recipient_sites: Vec<String>,
        /// Free text
        #[arg(long)]
        text: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum PartnerAction {
    /// List partners and their sites
    List,
    /// Partners buying a material from us
    Customers {
        #[arg(long)]
        material: String,
    },
    /// Partners supplying a material to us
    Suppliers {
        #[arg(long)]
        material: String,
    },
}

#[derive(Debug, Subcommand)]
enum StockAction {
    /// List own stocks
    List {
        #[arg(long)]
        kind: StockKind,
    },
    /// Record a new stock from its JSON form
    Create {
        #[arg(long)]
        kind: StockKind,
        #[arg(long)]
        file: PathBuf,
    },
    /// Update a stock from its JSON form
    Update {
        #[arg(long)]
        kind: StockKind,
        #[arg(long)]
        file: PathBuf,
    },
    /// Ask partners to re-report their stocks of a material
    Refresh {
        #[arg(long)]
        kind: StockKind,
        #[arg(long)]
        material: String,
    },
}

#[derive(Debug, Subcommand)]
enum EdcAction {
    /// Query a partner's catalog
    Catalog {
        #[arg(long)]
        partner: String,
        #[arg(long)]
        dsp_url: String,
    },
    /// List contract negotiations
    Negotiations,
    /// List transfer processes
    Transfers,
}

#[derive(Debug, Args)]
struct FileArg {
    /// JSON file holding the record
    #[arg(long)]
    file: PathBuf,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    let client = BackendClient::new(settings.backend).context("building backend client")?;
    let forms = settings.forms;

    let ok = match cli.command {
        Command::Deliveries { action } => deliveries(&client, &forms, action).await?,
        Command::Productions { action } => productions(&client, &forms, action).await?,
        Command::Notifications { action } => notifications(&client, &forms, action).await?,
        Command::Partners { action } => partners(&client, action).await?,
        Command::Materials => {
            print_json(&client.materials().await.context("fetching materials")?)?;
            true
        }
        Command::Units => {
            for (key, label) in unit_options() {
                println!("{key}\t{label}");
            }
            true
        }
        Command::Stocks { action } => stocks(&client, action).await?,
        Command::Edc { action } => edc(&client, action).await?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::from(1) })
}

async fn deliveries(
    client: &BackendClient,
    forms: &FormsConfig,
    action: RecordAction,
) -> Result<bool> {
    match action {
        RecordAction::List {
            material,
            partner,
            reported,
        } => {
            let records = if reported {
                client.reported_deliveries(&material, partner.as_deref()).await
            } else {
                client.deliveries(&material, partner.as_deref()).await
            }
            .context("fetching deliveries")?;
            print_json(&records)?;
            Ok(true)
        }
        RecordAction::Create(arg) => {
            let draft: Delivery = read_record(&arg.file)?;
            submit_form(client, forms, ModalMode::Create, draft).await
        }
        RecordAction::Edit(arg) => {
            let record: Delivery = read_record(&arg.file)?;
            submit_form(client, forms, ModalMode::Edit, record).await
        }
        RecordAction::Delete { id } => {
            delete_record(client, forms, Delivery {
                uuid: Some(id),
                ..Delivery::default()
            })
            .await
        }
    }
}

async fn productions(
    client: &BackendClient,
    forms: &FormsConfig,
    action: ProductionAction,
) -> Result<bool> {
    let action = match action {
        ProductionAction::Record(action) => action,
        ProductionAction::CreateRange(arg) => {
            let drafts: Vec<Production> = read_record(&arg.file)?;
            return create_range(client, &drafts).await;
        }
    };
    match action {
        RecordAction::List {
            material,
            partner,
            reported,
        } => {
            if reported {
                bail!("reported productions are not offered by the backend");
            }
            let records = client
                .productions(&material, partner.as_deref())
                .await
                .context("fetching productions")?;
            print_json(&records)?;
            Ok(true)
        }
        RecordAction::Create(arg) => {
            let draft: Production = read_record(&arg.file)?;
            submit_form(client, forms, ModalMode::Create, draft).await
        }
        RecordAction::Edit(arg) => {
            let record: Production = read_record(&arg.file)?;
            submit_form(client, forms, ModalMode::Edit, record).await
        }
        RecordAction::Delete { id } => {
            delete_record(client, forms, Production {
                uuid: Some(id),
                ..Production::default()
            })
            .await
        }
    }
}

async fn notifications(
    client: &BackendClient,
    forms: &FormsConfig,
    action: NotificationAction,
) -> Result<bool> {
    match action {
        NotificationAction::List => {
            let (notifications, partners) =
                futures::try_join!(client.notifications(), client.partners())
                    .context("fetching notifications")?;
            for n in &notifications {
                let partner = n
                    .partner_bpnl
                    .as_deref()
                    .map_or("-", |bpnl| Partner::display_name(&partners, bpnl));
                println!(
                    "{}\t{}\t{}\t{}",
                    n.notification_id.map(|id| id.to_string()).unwrap_or_default(),
                    partner,
                    n.status.map(|s| s.label()).unwrap_or("-"),
                    n.effect.map(|e| e.label()).unwrap_or("-"),
                );
            }
            Ok(true)
        }
        NotificationAction::Create(arg) => {
            let draft: DemandCapacityNotification = read_record(&arg.file)?;
            submit_form(client, forms, ModalMode::Create, draft).await
        }
        NotificationAction::Edit(arg) => {
            let record: DemandCapacityNotification = read_record(&arg.file)?;
            submit_form(client, forms, ModalMode::Edit, record).await
        }
        NotificationAction::React {
            origin,
            partner,
            materials,
            recipient_sites,
            text,
        } => {
            let (notifications, partners) =
                futures::try_join!(client.notifications(), client.partners())
                    .context("fetching notifications")?;
            let origin = notifications
                .into_iter()
                .find(|n| n.notification_id == Some(origin))
                .with_context(|| format!("notification {origin} not found"))?;
            check_reaction_partner(&partners, &origin, &partner)?;

            let mut modal = Modal::new(HttpGateway::new(client.clone()), forms);
            modal.open(ModalMode::React, Some(origin))?;
            let mut patch = vec![
                NotificationField::PartnerBpnl(Some(partner)),
                NotificationField::AffectedMaterialNumbers(materials),
                NotificationField::AffectedSitesBpnsRecipient(recipient_sites),
            ];
            if text.is_some() {
                patch.push(NotificationField::Text(text));
            }
            modal.update(patch)?;
            finish(modal).await
        }
    }
}

/// Reactions go to a known partner other than the one that sent the origin
fn check_reaction_partner(
    partners: &[Partner],
    origin: &DemandCapacityNotification,
    bpnl: &str,
) -> Result<()> {
    let offered = reaction_partners(partners, origin.partner_bpnl.as_deref());
    if offered.iter().any(|p| p.bpnl == bpnl) {
        return Ok(());
    }
    if origin.partner_bpnl.as_deref() == Some(bpnl) {
        bail!("a reaction cannot be sent to the partner of the original notification");
    }
    bail!("unknown partner {bpnl}")
}

async fn partners(client: &BackendClient, action: PartnerAction) -> Result<bool> {
    let partners = match action {
        PartnerAction::List => client.partners().await,
        PartnerAction::Customers { material } => client.customers_of(&material).await,
        PartnerAction::Suppliers { material } => client.suppliers_of(&material).await,
    }
    .context("fetching partners")?;
    for partner in &partners {
        print_partner(partner);
    }
    Ok(true)
}

async fn stocks(client: &BackendClient, action: StockAction) -> Result<bool> {
    let written = match action {
        StockAction::List {
            kind: StockKind::Product,
        } => {
            print_json(&client.product_stocks().await.context("fetching stocks")?)?;
            return Ok(true);
        }
        StockAction::List {
            kind: StockKind::Material,
        } => {
            print_json(&client.material_stocks().await.context("fetching stocks")?)?;
            return Ok(true);
        }
        StockAction::Refresh { kind, material } => {
            let answer = client
                .refresh_reported_stocks(kind, &material)
                .await
                .context("refreshing reported stocks")?;
            print_json(&answer)?;
            return Ok(true);
        }
        StockAction::Create { kind, file } => match kind {
            StockKind::Product => {
                let stock: ProductStock = read_record(&file)?;
                client.create_product_stock(&stock).await
            }
            StockKind::Material => {
                let stock: MaterialStock = read_record(&file)?;
                client.create_material_stock(&stock).await
            }
        },
        StockAction::Update { kind, file } => match kind {
            StockKind::Product => {
                let stock: ProductStock = read_record(&file)?;
                client.update_product_stock(&stock).await
            }
            StockKind::Material => {
                let stock: MaterialStock = read_record(&file)?;
                client.update_material_stock(&stock).await
            }
        },
    };
    match written {
        Ok(()) => Ok(true),
        Err(e) => {
            eprintln!("stock not saved: {}", GatewayError::from(e).message());
            Ok(false)
        }
    }
}

/// Validate every production up front, then send them as one batch
async fn create_range(client: &BackendClient, drafts: &[Production]) -> Result<bool> {
    let mut valid = true;
    for (index, draft) in drafts.iter().enumerate() {
        let report = draft.validate();
        if !report.is_valid() {
            eprintln!("production #{index}:");
            print_report(&report);
            valid = false;
        }
    }
    if !valid {
        return Ok(false);
    }

    let result = client
        .create_productions(drafts)
        .await
        .map_err(GatewayError::from);
    let n = settle_notification::<Production>(&result);
    println!("[{}] {}: {}", n.severity, n.title, n.description);
    Ok(result.is_ok())
}

async fn edc(client: &BackendClient, action: EdcAction) -> Result<bool> {
    match action {
        EdcAction::Catalog { partner, dsp_url } => {
            print_json(&client.catalog(&partner, &dsp_url).await.context("fetching catalog")?)?;
        }
        EdcAction::Negotiations => {
            print_json(&client.negotiations().await.context("fetching negotiations")?)?;
        }
        EdcAction::Transfers => {
            print_json(&client.transfers().await.context("fetching transfers")?)?;
        }
    }
    Ok(true)
}

/// Drive one record through the modal and report the outcome
async fn submit_form<T>(
    client: &BackendClient,
    forms: &FormsConfig,
    mode: ModalMode,
    record: T,
) -> Result<bool>
where
    T: FormRecord,
    HttpGateway: PersistenceGateway<T>,
{
    let mut modal = Modal::new(HttpGateway::new(client.clone()), forms);
    modal.open(mode, Some(record))?;
    finish(modal).await
}

async fn finish<T>(mut modal: Modal<T, HttpGateway>) -> Result<bool>
where
    T: FormRecord,
    HttpGateway: PersistenceGateway<T>,
{
    let outcome = modal.submit().await?;
    if let SubmitOutcome::Invalid(report) = &outcome {
        eprintln!("draft is incomplete");
        print_report(report);
        return Ok(false);
    }

    let mut ok = true;
    for n in modal.notifications_mut().take_unshown() {
        ok &= n.severity != Severity::Error;
        println!("[{}] {}: {}", n.severity, n.title, n.description);
    }
    Ok(ok)
}

async fn delete_record<T>(client: &BackendClient, forms: &FormsConfig, record: T) -> Result<bool>
where
    T: FormRecord,
    HttpGateway: PersistenceGateway<T>,
{
    let modal = Modal::new(HttpGateway::new(client.clone()), forms);
    match modal.delete(&record).await {
        Ok(()) => Ok(true),
        Err(e) => {
            eprintln!("delete failed: {}", e.message());
            Ok(false)
        }
    }
}

fn print_report(report: &ValidationReport) {
    for field in &report.missing {
        eprintln!("  missing: {field}");
    }
    if report.order_reference_invalid {
        eprintln!("  order reference must be complete or empty");
    }
    if report.end_before_start {
        eprintln!("  end of effect must be after its start");
    }
}

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_partner(partner: &Partner) {
    println!("{}\t{}", partner.bpnl, partner.name);
    for site in &partner.sites {
        println!("  {}\t{}", site.bpns, site.name);
    }
}
