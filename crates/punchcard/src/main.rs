use chrono::Utc;
use clap::Parser;
use entity::employee;
use migration::MigratorTrait;
use punchcard_lib::{
    config::{Command, Config},
    credentials::{self, ResetOutcome},
    server::run_server,
};
use sea_orm::{ActiveModelTrait, Database, EntityTrait, QueryOrder, Set};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let config = Config::parse();

    // Initialize logger based on command
    let log_level = match &config.command {
        Command::Serve(serve_config) => serve_config.log_level.as_str(),
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match config.command {
        Command::Serve(serve_config) => {
            run_server(serve_config).await?;
        }
        Command::Migrate { database_url } => {
            run_migrations(&database_url).await?;
        }
        Command::CreateEmployee {
            first_name,
            last_name,
        } => {
            create_employee(&first_name, &last_name).await?;
        }
        Command::ListEmployees => {
            list_employees().await?;
        }
        Command::DeactivateEmployee { employee_id } => {
            deactivate_employee(employee_id).await?;
        }
        Command::ResetPin { employee_id, pin } => {
            reset_pin(employee_id, pin.as_deref()).await?;
        }
    }

    Ok(())
}

fn database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://./punchcard.db?mode=rwc".to_string())
}

async fn run_migrations(database_url: &str) -> anyhow::Result<()> {
    log::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    log::info!("Running database migrations...");
    migration::Migrator::up(&db, None).await?;

    println!("✅ Database migrations completed successfully!");

    Ok(())
}

async fn create_employee(first_name: &str, last_name: &str) -> anyhow::Result<()> {
    let first_name = first_name.trim();
    let last_name = last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        anyhow::bail!("First and last name are required");
    }

    log::info!("Connecting to database...");
    let db = Database::connect(database_url()).await?;

    let now = Utc::now().timestamp();
    let new_employee = employee::ActiveModel {
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = employee::Entity::insert(new_employee).exec(&db).await?;

    println!("✅ Employee created successfully!");
    println!("   ID: {}", result.last_insert_id);
    println!("   Name: {} {}", first_name, last_name);
    println!("   No PIN set yet. Run `punchcard reset-pin -e {}` to provision one.", result.last_insert_id);

    Ok(())
}

async fn list_employees() -> anyhow::Result<()> {
    let db = Database::connect(database_url()).await?;

    let employees = employee::Entity::find()
        .find_also_related(entity::pin_credential::Entity)
        .order_by_asc(employee::Column::Id)
        .all(&db)
        .await?;

    if employees.is_empty() {
        println!("No employees found.");
    } else {
        println!("Employees:");
        println!("{:<5} {:<25} {:<8} {:<10}", "ID", "Name", "Active", "PIN set");
        println!("{}", "-".repeat(52));
        for (employee, credential) in employees {
            println!(
                "{:<5} {:<25} {:<8} {:<10}",
                employee.id,
                employee.full_name(),
                if employee.active { "yes" } else { "no" },
                if credential.is_some() { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}

async fn deactivate_employee(employee_id: i32) -> anyhow::Result<()> {
    let db = Database::connect(database_url()).await?;

    let employee = employee::Entity::find_by_id(employee_id).one(&db).await?;

    match employee {
        Some(employee) => {
            let name = employee.full_name();
            let mut active: employee::ActiveModel = employee.into();
            active.active = Set(false);
            active.updated_at = Set(Utc::now().timestamp());
            active.update(&db).await?;
            println!("✅ Employee '{}' deactivated.", name);
        }
        None => {
            anyhow::bail!("Employee {} not found", employee_id);
        }
    }

    Ok(())
}

async fn reset_pin(employee_id: i32, pin: Option<&str>) -> anyhow::Result<()> {
    let db = Database::connect(database_url()).await?;

    match credentials::reset_pin(&db, employee_id, pin).await? {
        ResetOutcome::Ok { pin } => {
            println!("✅ PIN for employee {} reset to {}.", employee_id, pin);
            if pin == punchcard_core::pin::DEFAULT_PIN {
                println!("   The employee will be asked to choose a new PIN at next sign-in.");
            }
        }
        ResetOutcome::EmployeeNotFound => {
            anyhow::bail!("Employee {} not found", employee_id);
        }
        ResetOutcome::InvalidPinFormat => {
            anyhow::bail!("PIN must be exactly 4 digits");
        }
    }

    Ok(())
}
