use rand::{rngs::StdRng, Rng, SeedableRng};
use sbfcore::records::{
    BlockRecord, EventRecord, FrontendGain, GainRecord, MeasurementEntry, MeasurementRecord,
};
use serde::{Deserialize, Serialize};

const GPS_L1CA: u8 = 0;
const GPS_L2C: u8 = 3;
const GAL_E1: u8 = 17;
const GAL_E5A: u8 = 20;
const GALILEO_SVID_OFFSET: u16 = 70;

/// Configuration for generating a synthetic decoded mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub satellites: usize,
    pub epochs: usize,
    pub interval_ms: u32,
    pub start_tow: u32,
    pub wnc: u16,
    /// One trigger every `event_every` epochs; 0 disables events.
    pub event_every: usize,
    pub gain_every: usize,
    pub base_snr: f64,
    pub noise: f64,
    pub seed: u64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            satellites: 10,
            epochs: 600,
            interval_ms: 100,
            start_tow: 345_600_000,
            wnc: 2300,
            event_every: 50,
            gain_every: 10,
            base_snr: 48.0,
            noise: 1.5,
            seed: 0,
        }
    }
}

impl MissionConfig {
    fn normalized_interval(&self) -> u32 {
        self.interval_ms.max(1)
    }
}

// Inverse of the receiver's CN0 encoding for signals carrying the 10 dB offset.
fn encode_cn0(snr: f64) -> u16 {
    ((snr - 10.0).max(0.0) * 4.0).round() as u16
}

/// Even satellites are GPS (L1CA + nested L2C), odd ones Galileo (E1 + nested E5a).
fn build_entries(config: &MissionConfig, rng: &mut StdRng) -> Vec<MeasurementEntry> {
    (0..config.satellites)
        .map(|idx| {
            let slot = (idx / 2 + 1) as u16;
            let snr = config.base_snr - idx as f64 * 1.2 + rng.gen_range(-config.noise..=config.noise);
            let secondary = snr - 4.0 + rng.gen_range(-config.noise..=config.noise);
            if idx % 2 == 0 {
                MeasurementEntry::new(slot, GPS_L1CA, encode_cn0(snr))
                    .with_nested(GPS_L2C, encode_cn0(secondary))
            } else {
                MeasurementEntry::new(slot + GALILEO_SVID_OFFSET, GAL_E1, encode_cn0(snr))
                    .with_nested(GAL_E5A, encode_cn0(secondary))
            }
        })
        .collect()
}

pub fn build_mission(config: &MissionConfig) -> Vec<BlockRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let interval = config.normalized_interval();
    let mut records = Vec::with_capacity(config.epochs * 2);

    for epoch in 0..config.epochs {
        let tow = config
            .start_tow
            .saturating_add(interval.saturating_mul(epoch as u32));
        records.push(BlockRecord::Measurement(MeasurementRecord::new(
            tow,
            config.wnc,
            build_entries(config, &mut rng),
        )));

        if config.event_every > 0 && epoch % config.event_every == 0 {
            records.push(BlockRecord::Event(EventRecord {
                tow: tow + rng.gen_range(0..interval),
                wnc: config.wnc,
            }));
        }

        if config.gain_every > 0 && epoch % config.gain_every == 0 {
            records.push(BlockRecord::Gain(GainRecord {
                tow,
                wnc: config.wnc,
                frontends: vec![
                    FrontendGain {
                        frontend: 0,
                        gain: 30 + rng.gen_range(-2..=2),
                    },
                    FrontendGain {
                        frontend: 3,
                        gain: 26 + rng.gen_range(-2..=2),
                    },
                ],
            }));
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(records: &[BlockRecord], pred: fn(&BlockRecord) -> bool) -> usize {
        records.iter().filter(|record| pred(record)).count()
    }

    #[test]
    fn generator_emits_expected_block_mix() {
        let config = MissionConfig {
            epochs: 100,
            ..Default::default()
        };
        let records = build_mission(&config);

        assert_eq!(count(&records, |r| matches!(r, BlockRecord::Measurement(_))), 100);
        assert_eq!(count(&records, |r| matches!(r, BlockRecord::Event(_))), 2);
        assert_eq!(count(&records, |r| matches!(r, BlockRecord::Gain(_))), 10);
    }

    #[test]
    fn events_fall_inside_their_epoch_bucket() {
        let config = MissionConfig {
            epochs: 200,
            event_every: 20,
            seed: 7,
            ..Default::default()
        };
        for record in build_mission(&config) {
            if let BlockRecord::Event(event) = record {
                let bucket = event.tow / 100 * 100;
                assert_eq!((bucket - config.start_tow) % config.interval_ms, 0);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_mission() {
        let config = MissionConfig {
            epochs: 20,
            seed: 42,
            ..Default::default()
        };
        assert_eq!(build_mission(&config), build_mission(&config));
    }
}
