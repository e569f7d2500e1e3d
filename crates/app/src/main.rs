//! Storefront Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use storefront_app::{
    auth::{DEFAULT_BCRYPT_COST, PasswordHasher},
    database::{self, DEFAULT_MAX_CONNECTIONS, Db},
    domain::users::{PgUsersService, UsersService, data::NewUser},
};

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    User(UserCommand),
}

#[derive(Debug, Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Register a user directly, bypassing the HTTP API
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    /// Plain-text password; hashed before storage
    #[arg(long, env = "STOREFRONT_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// USER, SELLER or ADMIN
    #[arg(long, default_value = "ADMIN")]
    role: String,

    /// bcrypt work factor
    #[arg(long, env = "BCRYPT_COST", default_value_t = DEFAULT_BCRYPT_COST)]
    bcrypt_cost: u32,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        #[expect(clippy::print_stderr, reason = "command-line tool reports failures on stderr")]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}

#[expect(clippy::print_stdout, reason = "command-line tool reports results on stdout")]
async fn run(cli: Cli) -> Result<(), String> {
    let database_url = cli
        .database_url
        .ok_or_else(|| "DATABASE_URL is required".to_string())?;

    let pool = database::connect(&database_url, DEFAULT_MAX_CONNECTIONS)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    match cli.command {
        Commands::Migrate => {
            database::migrate(&pool)
                .await
                .map_err(|error| format!("failed to apply migrations: {error}"))?;

            println!("migrations applied");

            Ok(())
        }
        Commands::User(UserCommand {
            command: UserSubcommand::Create(args),
        }) => create_user(Db::new(pool), args).await,
    }
}

#[expect(clippy::print_stdout, reason = "command-line tool reports results on stdout")]
async fn create_user(db: Db, args: CreateUserArgs) -> Result<(), String> {
    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let service = PgUsersService::new(db, PasswordHasher::new(args.bcrypt_cost));

    let user = service
        .register_user(NewUser {
            username: args.username,
            email: args.email,
            password: args.password,
            role: Some(args.role),
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.id);
    println!("username: {}", user.username);
    println!("role: {}", user.role);

    Ok(())
}
