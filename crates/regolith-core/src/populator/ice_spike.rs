//! Ice spike placement

use crate::amount::VariableAmount;
use crate::chunk::{Chunk, CHUNK_SIZE};
use crate::populator::{rooting_spot, BuildError, Populator};
use crate::rng::PlacementRng;
use rand::{Rng, RngCore};
use regolith_blocks::BlockId;
use serde::{Deserialize, Serialize};

/// Raises tapered spikes of packed ice from snowy ground
///
/// A small fraction of spikes is "extreme": their height is increased by an
/// extra random draw, producing the occasional landmark pillar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IceSpike {
    spikes_per_chunk: VariableAmount,
    height: VariableAmount,
    extreme_spike_probability: f64,
    extreme_spike_increase: VariableAmount,
}

impl IceSpike {
    pub fn builder() -> IceSpikeBuilder {
        IceSpikeBuilder::default()
    }

    pub fn spikes_per_chunk(&self) -> VariableAmount {
        self.spikes_per_chunk
    }

    pub fn set_spikes_per_chunk(&mut self, count: VariableAmount) {
        self.spikes_per_chunk = count;
    }

    pub fn height(&self) -> VariableAmount {
        self.height
    }

    pub fn set_height(&mut self, height: VariableAmount) {
        self.height = height;
    }

    pub fn extreme_spike_probability(&self) -> f64 {
        self.extreme_spike_probability
    }

    /// Set the chance for a spike to be extreme; must be within `[0, 1]`
    pub fn set_extreme_spike_probability(&mut self, p: f64) -> Result<(), BuildError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(BuildError::InvalidChance(p));
        }
        self.extreme_spike_probability = p;
        Ok(())
    }

    pub fn extreme_spike_increase(&self) -> VariableAmount {
        self.extreme_spike_increase
    }

    pub fn set_extreme_spike_increase(&mut self, increase: VariableAmount) {
        self.extreme_spike_increase = increase;
    }
}

impl Populator for IceSpike {
    fn name(&self) -> &'static str {
        "ice_spike"
    }

    fn populate(&self, chunk: &mut Chunk, rng: &mut dyn RngCore) {
        let count = self.spikes_per_chunk.get_floored_amount(rng).max(0);

        let mut placed = 0;
        for _ in 0..count {
            let x = rng.gen_range(0..CHUNK_SIZE);
            let soils = [BlockId::SNOW, BlockId::GRASS, BlockId::DIRT];
            let Some(base) = rooting_spot(chunk, x, &soils) else {
                continue;
            };

            let mut height = self.height.get_floored_amount(rng);
            if rng.check_chance(self.extreme_spike_probability) {
                height += self.extreme_spike_increase.get_floored_amount(rng).max(0);
            }
            if height <= 0 {
                log::warn!("ice spike height sampled non-positive ({}), skipping", height);
                continue;
            }

            // Central column of packed ice; stops at the first obstruction
            let mut tip = base;
            for y in base..CHUNK_SIZE.min(base + height as usize) {
                if !chunk.is_air(x, y) {
                    break;
                }
                chunk.set(x, y, BlockId::PACKED_ICE);
                tip = y;
            }

            // Widen the lower third with plain ice for the tapered silhouette
            let widen_rows = ((tip - base) / 3).max(1);
            for y in base..base + widen_rows {
                if x > 0 && chunk.is_air(x - 1, y) {
                    chunk.set(x - 1, y, BlockId::ICE);
                }
                if x + 1 < CHUNK_SIZE && chunk.is_air(x + 1, y) {
                    chunk.set(x + 1, y, BlockId::ICE);
                }
            }
            placed += 1;
        }

        log::debug!(
            "placed {} ice spikes in chunk ({}, {})",
            placed,
            chunk.x,
            chunk.y
        );
    }
}

/// Builder for [`IceSpike`]
#[derive(Clone, Debug, Default)]
pub struct IceSpikeBuilder {
    per_chunk: Option<VariableAmount>,
    height: Option<VariableAmount>,
    extreme_spike_probability: Option<f64>,
    extreme_spike_increase: Option<VariableAmount>,
}

impl IceSpikeBuilder {
    /// Number of spikes to attempt per chunk
    pub fn per_chunk(mut self, count: VariableAmount) -> Self {
        self.per_chunk = Some(count);
        self
    }

    /// Base spike height
    pub fn height(mut self, height: VariableAmount) -> Self {
        self.height = Some(height);
        self
    }

    /// Chance for a spike to be extreme (default 0.02)
    pub fn extreme_spike_probability(mut self, p: f64) -> Self {
        self.extreme_spike_probability = Some(p);
        self
    }

    /// Extra height drawn for extreme spikes (default 10 + up to 20 more)
    pub fn extreme_spike_increase(mut self, increase: VariableAmount) -> Self {
        self.extreme_spike_increase = Some(increase);
        self
    }

    /// Drop everything set so far
    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn build(self) -> Result<IceSpike, BuildError> {
        let spikes_per_chunk = self
            .per_chunk
            .ok_or(BuildError::MissingField("spikes_per_chunk"))?;
        let height = self.height.ok_or(BuildError::MissingField("height"))?;

        let extreme_spike_probability = self.extreme_spike_probability.unwrap_or(0.02);
        if !(0.0..=1.0).contains(&extreme_spike_probability) {
            return Err(BuildError::InvalidChance(extreme_spike_probability));
        }

        let extreme_spike_increase =
            self.extreme_spike_increase
                .unwrap_or(VariableAmount::BaseWithRandomAddition {
                    base: 10.0,
                    addition: 20.0,
                });

        Ok(IceSpike {
            spikes_per_chunk,
            height,
            extreme_spike_probability,
            extreme_spike_increase,
        })
    }
}
