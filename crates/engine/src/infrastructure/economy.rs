//! Fixed price economy with in-memory balances.

use async_trait::async_trait;
use dashmap::DashMap;
use doorwright_domain::{Player, PlayerId, StructureKind, WorldId};

use crate::infrastructure::ports::EconomyPort;

/// Charges a flat price per block. A price of zero disables the economy.
pub struct FixedPriceEconomy {
    price_per_block: f64,
    starting_balance: f64,
    balances: DashMap<PlayerId, f64>,
}

impl FixedPriceEconomy {
    pub fn new(price_per_block: f64, starting_balance: f64) -> Self {
        Self {
            price_per_block,
            starting_balance,
            balances: DashMap::new(),
        }
    }

    pub fn balance(&self, player: PlayerId) -> f64 {
        self.balances
            .get(&player)
            .map(|b| *b)
            .unwrap_or(self.starting_balance)
    }
}

#[async_trait]
impl EconomyPort for FixedPriceEconomy {
    fn is_enabled(&self) -> bool {
        self.price_per_block > 0.0
    }

    fn get_price(&self, _kind: StructureKind, block_count: i64) -> Option<f64> {
        self.is_enabled()
            .then(|| self.price_per_block * block_count as f64)
    }

    async fn purchase(
        &self,
        player: &Player,
        world: WorldId,
        kind: StructureKind,
        block_count: i64,
    ) -> bool {
        let Some(price) = self.get_price(kind, block_count) else {
            return true;
        };
        let mut balance = self
            .balances
            .entry(player.id)
            .or_insert(self.starting_balance);
        if *balance < price {
            tracing::debug!(
                player = %player.id,
                world = %world,
                price,
                balance = *balance,
                "Purchase refused"
            );
            return false;
        }
        *balance -= price;
        tracing::info!(player = %player.id, world = %world, kind = %kind, price, "Structure purchased");
        true
    }
}
