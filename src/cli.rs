//! Command-line surface of the console.
//!
//! Each page of the original web console maps to a subcommand: the auth
//! pages are ungated, the profile pages require a session, and the
//! dashboard pages require the admin role. The guard gates command
//! execution exactly the way it gated page rendering.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use uuid::Uuid;

use crate::api::{
    self,
    auth::{LoginRequest, RegisterRequest},
    models::{AuthData, DisplayUser, Stats, UpdateProfile, UserPage},
};
use crate::auth::guard::{Destination, GuardConfig, GuardState, Navigator, RouteGuard};
use crate::auth::session::Session;
use crate::auth::store::FileStateStore;
use crate::client::ApiClient;

/// Renders guard redirects for a terminal: "going to login" becomes an
/// instruction to run `userdesk login`, and "going home" a denial notice.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, to: Destination) {
        match to {
            Destination::Login => eprintln!("No active session. Run `userdesk login` first."),
            Destination::Home => eprintln!("Access denied: admins only."),
        }
    }
}

#[derive(Parser)]
#[command(
    name = "userdesk",
    version,
    about = "Terminal console for the user/role administration backend"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// Request a password-reset OTP by email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Reset the password with an emailed OTP
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
        #[arg(long)]
        new_password: String,
    },
    /// Self-service profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Delete the signed-in account
    DeleteAccount {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Admin: user management
    #[command(subcommand)]
    Users(UsersCommand),
    /// Admin: role management
    #[command(subcommand)]
    Roles(RolesCommand),
    /// Admin: overview stats
    Dashboard,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the signed-in user's profile
    Show,
    /// Update profile fields; omitted fields are left untouched
    Update {
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        date_of_birth: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
        #[arg(long)]
        nationality: Option<String>,
        #[arg(long)]
        religion: Option<String>,
        #[arg(long)]
        current_location: Option<String>,
        #[arg(long)]
        zip: Option<String>,
        #[arg(long)]
        hometown: Option<String>,
    },
    /// Upload a new profile image
    SetImage { path: PathBuf },
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List users, optionally filtered by email
    List {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Activate or deactivate an account
    SetStatus {
        id: Uuid,
        #[arg(long, action = ArgAction::Set)]
        active: bool,
    },
    /// Reassign a user's role
    SetRole {
        id: Uuid,
        #[arg(long)]
        role_id: Uuid,
    },
    /// Delete a user
    Delete {
        id: Uuid,
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum RolesCommand {
    /// List all roles
    List,
    /// Show the total number of roles
    Count,
    /// Show one role
    Show { id: Uuid },
    /// Create a role
    Create { name: String },
    /// Rename a role
    Update { id: Uuid, name: String },
    /// Delete a role
    Delete {
        id: Uuid,
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
}

/// Everything a command handler needs.
pub struct App {
    pub client: ApiClient,
    pub session: Session,
    pub guard: RouteGuard,
    pub state: Arc<FileStateStore>,
}

impl App {
    fn authorized(&self, admin_only: bool) -> bool {
        self.guard.evaluate(GuardConfig { admin_only }) == GuardState::Authorized
    }

    fn remember(&self, data: &AuthData) {
        self.state.set_display(&DisplayUser {
            id: data.id,
            email: data.email.clone(),
            username: data.username.clone(),
            role: data.role.clone(),
        });
    }
}

pub async fn run(app: &App, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let data = api::auth::login(&app.client, &LoginRequest { email, password }).await?;
            app.remember(&data);
            println!("Logged in as {} ({})", data.username, data.role);
        }
        Command::Register {
            first_name,
            last_name,
            email,
            password,
        } => {
            let request = RegisterRequest {
                first_name,
                last_name,
                email,
                password,
            };
            let data = api::auth::register(&app.client, &request).await?;
            app.remember(&data);
            println!("Registered and logged in as {}", data.username);
        }
        Command::Logout => {
            api::auth::logout(&app.client);
            app.state.remove_display();
            println!("Logged out.");
        }
        Command::Whoami => {
            if !app.authorized(false) {
                return Ok(());
            }
            match app.session.claims() {
                Some(claims) => {
                    println!("subject:  {}", claims.sub);
                    println!("email:    {}", claims.email);
                    println!("role:     {}", claims.role);
                    println!("expires:  {}", claims.exp);
                    if let Some(user) = app.state.display() {
                        println!("username: {}", user.username);
                    }
                }
                None => eprintln!("No active session."),
            }
        }
        Command::ForgotPassword { email } => {
            api::auth::forgot_password(&app.client, &email).await?;
            println!("Password reset OTP sent to {email}.");
        }
        Command::ResetPassword {
            email,
            otp,
            new_password,
        } => {
            api::auth::reset_password(&app.client, &email, &otp, &new_password).await?;
            println!("Password has been reset. You can now log in with the new password.");
        }
        Command::Profile(command) => {
            if !app.authorized(false) {
                return Ok(());
            }
            run_profile(app, command).await?;
        }
        Command::DeleteAccount { yes } => {
            if !app.authorized(false) {
                return Ok(());
            }
            if !yes {
                eprintln!("This permanently deletes your account. Re-run with --yes to confirm.");
                return Ok(());
            }
            api::profile::delete_account(&app.client).await?;
            app.state.remove_display();
            println!("Account deleted.");
        }
        Command::Users(command) => {
            if !app.authorized(true) {
                return Ok(());
            }
            run_users(app, command).await?;
        }
        Command::Roles(command) => {
            if !app.authorized(true) {
                return Ok(());
            }
            run_roles(app, command).await?;
        }
        Command::Dashboard => {
            if !app.authorized(true) {
                return Ok(());
            }
            let stats = fetch_stats(&app.client).await;
            println!("Users:        {}", stats.users);
            println!("Active users: {}", stats.active_users);
            println!("Roles:        {}", stats.roles);
        }
    }
    Ok(())
}

async fn run_profile(app: &App, command: ProfileCommand) -> anyhow::Result<()> {
    match command {
        ProfileCommand::Show => {
            let profile = api::profile::get(&app.client).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfileCommand::Update {
            bio,
            date_of_birth,
            gender,
            phone_number,
            nationality,
            religion,
            current_location,
            zip,
            hometown,
        } => {
            let changes = UpdateProfile {
                bio,
                date_of_birth,
                gender,
                phone_number,
                nationality,
                religion,
                current_location,
                zip,
                hometown,
            };
            api::profile::update(&app.client, &changes).await?;
            println!("Profile updated.");
        }
        ProfileCommand::SetImage { path } => {
            api::profile::upload_image(&app.client, &path).await?;
            println!("Profile image updated.");
        }
    }
    Ok(())
}

async fn run_users(app: &App, command: UsersCommand) -> anyhow::Result<()> {
    match command {
        UsersCommand::List { email, page } => {
            let result = match email {
                Some(email) => api::users::search_by_email(&app.client, &email, page).await?,
                None => api::users::list(&app.client, page).await?,
            };
            print_users(&result, page);
        }
        UsersCommand::SetStatus { id, active } => {
            api::users::set_status(&app.client, id, active).await?;
            println!(
                "User {id} is now {}.",
                if active { "active" } else { "inactive" }
            );
        }
        UsersCommand::SetRole { id, role_id } => {
            api::users::set_role(&app.client, id, role_id).await?;
            println!("Role updated for user {id}.");
        }
        UsersCommand::Delete { id, yes } => {
            if !yes {
                eprintln!("This permanently deletes the user. Re-run with --yes to confirm.");
                return Ok(());
            }
            api::users::delete(&app.client, id).await?;
            println!("User {id} deleted.");
        }
    }
    Ok(())
}

async fn run_roles(app: &App, command: RolesCommand) -> anyhow::Result<()> {
    match command {
        RolesCommand::List => {
            for role in api::roles::list(&app.client).await? {
                println!("{}  {}", role.id, role.name);
            }
        }
        RolesCommand::Count => {
            println!("{}", api::roles::count(&app.client).await?);
        }
        RolesCommand::Show { id } => {
            let role = api::roles::get(&app.client, id).await?;
            println!("{}", serde_json::to_string_pretty(&role)?);
        }
        RolesCommand::Create { name } => {
            let role = api::roles::create(&app.client, &name).await?;
            println!("Created role {} ({}).", role.name, role.id);
        }
        RolesCommand::Update { id, name } => {
            let role = api::roles::update(&app.client, id, &name).await?;
            println!("Renamed role {} to {}.", role.id, role.name);
        }
        RolesCommand::Delete { id, yes } => {
            if !yes {
                eprintln!("This permanently deletes the role. Re-run with --yes to confirm.");
                return Ok(());
            }
            api::roles::delete(&app.client, id).await?;
            println!("Role {id} deleted.");
        }
    }
    Ok(())
}

fn print_users(page_result: &UserPage, page: u64) {
    if page_result.users.is_empty() {
        println!("No users found.");
        return;
    }
    for user in &page_result.users {
        let role = user
            .role
            .as_ref()
            .map(|role| role.name.as_str())
            .unwrap_or("-");
        let status = if user.is_active { "active" } else { "inactive" };
        println!(
            "{}  {:<30}  {:<20}  {:<10}  {}",
            user.id, user.email, user.username, role, status
        );
    }
    let pages = page_result.total.div_ceil(api::users::PAGE_SIZE).max(1);
    println!("page {page}/{pages} ({} users total)", page_result.total);
}

/// Dashboard tiles. Either source failing degrades that tile to zero
/// instead of failing the whole page, like the original overview did.
async fn fetch_stats(client: &ApiClient) -> Stats {
    let users = match api::users::list(client, 1).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("failed to fetch users: {}", e);
            UserPage::default()
        }
    };
    let roles = match api::roles::count(client).await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!("failed to fetch role count: {}", e);
            0
        }
    };
    Stats {
        users: users.total,
        roles,
        active_users: users.active_count,
    }
}
