//! Game Use Cases
//!
//! Reads are open to any authenticated principal; writes need Admin.

use std::sync::Arc;

use auth::Principal;
use auth::policy::{Action, authorize_action};
use kernel::id::GameId;

use crate::domain::entities::Game;
use crate::domain::repository::GameRepository;
use crate::domain::value_objects::GameDraft;
use crate::error::{CatalogError, CatalogResult};

/// Raw game fields as received
pub struct GameInput {
    pub title: String,
    pub developer: String,
    pub release_date: String,
    pub description: String,
}

impl GameInput {
    fn into_draft(self) -> CatalogResult<GameDraft> {
        GameDraft::new(
            self.title,
            self.developer,
            &self.release_date,
            self.description,
        )
    }
}

/// Game use case
pub struct GameUseCase<G>
where
    G: GameRepository,
{
    game_repo: Arc<G>,
}

impl<G> GameUseCase<G>
where
    G: GameRepository,
{
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    pub async fn create(&self, principal: &Principal, input: GameInput) -> CatalogResult<Game> {
        authorize_action(principal, Action::CreateGame)?;
        let draft = input.into_draft()?;

        let game = self.game_repo.insert_game(&draft).await?;

        tracing::info!(game_id = %game.id, title = %game.title, "Game created");
        Ok(game)
    }

    pub async fn list(&self, principal: &Principal) -> CatalogResult<Vec<Game>> {
        authorize_action(principal, Action::ReadGames)?;
        self.game_repo.list_games().await
    }

    pub async fn get(&self, principal: &Principal, id: GameId) -> CatalogResult<Game> {
        authorize_action(principal, Action::ReadGames)?;
        self.game_repo
            .find_game(id)
            .await?
            .ok_or(CatalogError::GameNotFound)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: GameId,
        input: GameInput,
    ) -> CatalogResult<Game> {
        authorize_action(principal, Action::UpdateGame)?;
        let draft = input.into_draft()?;

        let game = self
            .game_repo
            .update_game(id, &draft)
            .await?
            .ok_or(CatalogError::GameNotFound)?;

        tracing::info!(game_id = %game.id, "Game updated");
        Ok(game)
    }

    pub async fn delete(&self, principal: &Principal, id: GameId) -> CatalogResult<()> {
        authorize_action(principal, Action::DeleteGame)?;

        if !self.game_repo.delete_game(id).await? {
            return Err(CatalogError::GameNotFound);
        }

        tracing::info!(game_id = %id, "Game deleted");
        Ok(())
    }
}
