use clap::Subcommand;

use crate::auth::Role;
use crate::database::manager::DatabaseManager;
use crate::database::models::user::CreateUserRequest;
use crate::database::repos::UserRepo;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Bootstrap a super admin account (direct database access)")]
    CreateSuper {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
}

pub async fn handle(cmd: UserCommands) -> anyhow::Result<()> {
    match cmd {
        UserCommands::CreateSuper { username, password } => {
            DatabaseManager::migrate().await?;
            let pool = DatabaseManager::pool().await?;
            let user = UserRepo::create(
                &pool,
                None,
                &CreateUserRequest {
                    role: Role::SuperAdmin,
                    username,
                    password,
                    unit_id: None,
                    bavanakutayima_id: None,
                    member_id: None,
                },
            )
            .await?;
            println!("created super admin {} ({})", user.username, user.id);
            Ok(())
        }
    }
}
