/// Rule constants and tunable parameters.
///
/// `Default` reproduces the standard rules. Every field is optional in a
/// serialized config; missing fields fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Bonus for the n-th redeemed set while n is within the schedule.
    pub set_bonus_schedule: Vec<u32>,

    /// Added per redemption once the schedule is exhausted.
    pub set_bonus_increment: u32,

    /// Flat bonus when any redeemed card names a territory the player holds.
    pub matching_territory_bonus: u32,

    /// Territory bonus floor at the start of a turn.
    pub min_territory_bonus: u32,

    /// One bonus troop per this many territories held.
    pub territories_per_bonus_troop: u32,

    /// Initial reserve, indexed by `player_count - MIN_PLAYERS`.
    pub initial_troops: Vec<u32>,
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = 6;
    pub const CARDS_PER_SET: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SET_BONUS_SCHEDULE: [u32; 6] = [4, 6, 8, 10, 12, 15];
    pub const DEFAULT_SET_BONUS_INCREMENT: u32 = 5;
    pub const DEFAULT_MATCHING_TERRITORY_BONUS: u32 = 2;
    pub const DEFAULT_MIN_TERRITORY_BONUS: u32 = 3;
    pub const DEFAULT_TERRITORIES_PER_BONUS_TROOP: u32 = 3;
    pub const DEFAULT_INITIAL_TROOPS: [u32; 5] = [40, 35, 30, 25, 20];

    pub fn new() -> Self {
        Self {
            set_bonus_schedule: Self::DEFAULT_SET_BONUS_SCHEDULE.to_vec(),
            set_bonus_increment: Self::DEFAULT_SET_BONUS_INCREMENT,
            matching_territory_bonus: Self::DEFAULT_MATCHING_TERRITORY_BONUS,
            min_territory_bonus: Self::DEFAULT_MIN_TERRITORY_BONUS,
            territories_per_bonus_troop: Self::DEFAULT_TERRITORIES_PER_BONUS_TROOP,
            initial_troops: Self::DEFAULT_INITIAL_TROOPS.to_vec(),
        }
    }

    /// Bonus for redeeming a set when `sets_redeemed` sets were redeemed before.
    ///
    /// Past the end of the schedule the bonus grows by the increment per set:
    /// with the defaults, the 7th set (counter 6) is worth 20, the 8th 25.
    pub fn set_bonus(&self, sets_redeemed: u32) -> u32 {
        let fixed = &self.set_bonus_schedule;
        match fixed.get(sets_redeemed as usize) {
            Some(&bonus) => bonus,
            None => {
                let last = fixed.last().copied().unwrap_or(0);
                let beyond = sets_redeemed.saturating_sub(fixed.len() as u32) + 1;
                last.saturating_add(self.set_bonus_increment.saturating_mul(beyond))
            }
        }
    }

    /// Initial reserve for each player, or `None` when the count is out of bounds.
    pub fn initial_troops_for(&self, player_count: usize) -> Option<u32> {
        if !(Self::MIN_PLAYERS..=Self::MAX_PLAYERS).contains(&player_count) {
            return None;
        }
        self.initial_troops
            .get(player_count - Self::MIN_PLAYERS)
            .copied()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
