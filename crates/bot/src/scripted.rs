// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Scripted and random strategies.
use log::debug;
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use std::collections::VecDeque;

use holdem_core::{
    Error, Result,
    strategy::{ActionChoice, ActionRequest, Strategy},
};

/// A strategy that plays a script of actions and then random legal actions.
///
/// The script is a string of `F` (fold), `C` (check or call) and `R` (raise)
/// actions, a raise is played as a call when raising is not legal.
#[derive(Debug, Clone)]
pub struct ScriptedStrategy {
    script: VecDeque<ActionChoice>,
    rng: StdRng,
}

impl ScriptedStrategy {
    /// Creates a strategy with a script and a random seed.
    pub fn new(script: &str) -> Result<Self> {
        Self::with_rng(script, StdRng::from_os_rng())
    }

    /// Creates a strategy with a script and a fixed seed.
    pub fn with_seed(script: &str, seed: u64) -> Result<Self> {
        Self::with_rng(script, StdRng::seed_from_u64(seed))
    }

    /// Creates a strategy that always plays random legal actions.
    pub fn random(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            script: VecDeque::default(),
            rng,
        }
    }

    fn with_rng(script: &str, rng: StdRng) -> Result<Self> {
        let script = script
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_string().parse::<ActionChoice>())
            .collect::<Result<VecDeque<_>>>()?;

        Ok(Self { script, rng })
    }

    /// Number of scripted actions left.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Strategy for ScriptedStrategy {
    fn decide(&mut self, req: &ActionRequest) -> Result<ActionChoice> {
        if let Some(choice) = self.script.pop_front() {
            return Ok(match choice {
                ActionChoice::Raise if !req.is_legal(ActionChoice::Raise) => ActionChoice::Call,
                choice => choice,
            });
        }

        let choice = req
            .actions
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| Error::CannotBet(req.player_id.clone()))?;
        debug!("Player {} random choice {choice}", req.player_id);
        Ok(choice)
    }
}

/// A strategy that always checks or calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct CallingStation;

impl Strategy for CallingStation {
    fn decide(&mut self, _req: &ActionRequest) -> Result<ActionChoice> {
        Ok(ActionChoice::Call)
    }
}
