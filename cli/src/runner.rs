//! CLI runner - executes commands

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use qiita_core::{QiitaClient, RequestContext};
use serde::Serialize;
use serde_json::json;

use crate::commands::{Cli, Commands};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the client, run the selected command and print its result.
    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        let client = self.client()?;
        let ctx = match self.cli.timeout {
            Some(secs) => RequestContext::with_timeout(Duration::from_secs(secs)),
            None => RequestContext::background(),
        };
        tracing::debug!(base_url = %client.base_url(), command = ?self.cli.command, "running");
        execute(&client, &ctx, &self.cli.command, out)
    }

    fn client(&self) -> Result<QiitaClient> {
        let mut builder = QiitaClient::builder()
            .base_url(&self.cli.base_url)
            .logger(tracing::dispatcher::get_default(|dispatch| dispatch.clone()));
        if let Some(token) = &self.cli.token {
            builder = builder.access_token(token);
        }
        builder
            .build()
            .with_context(|| format!("cannot use base URL '{}'", self.cli.base_url))
    }
}

/// Run `command` against `client` and write the result as pretty JSON.
pub fn execute(
    client: &QiitaClient,
    ctx: &RequestContext,
    command: &Commands,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::User { id } => print(out, &client.get_user(ctx, id)?),
        Commands::Users { page } => print(out, &client.get_users(ctx, page.page, page.per_page)?),
        Commands::Followees { id, page } => {
            print(out, &client.get_followees(ctx, id, page.page, page.per_page)?)
        }
        Commands::Followers { id, page } => {
            print(out, &client.get_followers(ctx, id, page.page, page.per_page)?)
        }
        Commands::FollowingUser { id } => {
            let following = client.is_following_user(ctx, id)?;
            print(out, &json!({ "user": id, "following": following }))
        }
        Commands::Me => print(out, &client.get_authenticated_user(ctx)?),
        Commands::Item { id } => print(out, &client.get_item(ctx, id)?),
        Commands::Items { query, page } => print(
            out,
            &client.get_items(ctx, page.page, page.per_page, query.as_deref())?,
        ),
        Commands::UserItems { id, page } => {
            print(out, &client.get_user_items(ctx, id, page.page, page.per_page)?)
        }
        Commands::Stocks { id, page } => {
            print(out, &client.get_user_stocks(ctx, id, page.page, page.per_page)?)
        }
        Commands::Stockers { id, page } => {
            print(out, &client.get_item_stockers(ctx, id, page.page, page.per_page)?)
        }
        Commands::Tag { id } => print(out, &client.get_tag(ctx, id)?),
        Commands::Tags { sort, page } => print(
            out,
            &client.get_tags(ctx, page.page, page.per_page, (*sort).into())?,
        ),
        Commands::TagItems { id, page } => {
            print(out, &client.get_tag_items(ctx, id, page.page, page.per_page)?)
        }
        Commands::FollowingTag { id } => {
            let following = client.is_following_tag(ctx, id)?;
            print(out, &json!({ "tag": id, "following": following }))
        }
        Commands::FollowingTags { id, page } => {
            print(out, &client.get_following_tags(ctx, id, page.page, page.per_page)?)
        }
        Commands::Comment { id } => print(out, &client.get_comment(ctx, id)?),
        Commands::Comments { id } => print(out, &client.get_item_comments(ctx, id)?),
    }
}

fn print<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
