use super::one_pole::tan_exact;
use super::response::{FilterMode, Response};

/*
Mode Filter Bank
================

A batch of B state-variable filters driven by the same input and summed into
one output. Each filter is one mode of the resonating body: a narrow
band-pass centred on the mode frequency, with Q setting how long it rings.

Every mode uses the zero-delay-feedback SVF (two trapezoidal integrators,
the feedback loop solved per sample):

    hp = (x - (r + g) * s1 - s2) * h        h = 1 / (1 + r g + g^2)
    bp = g * hp + s1                        s1' = g * hp + bp
    lp = g * bp + s2                        s2' = g * bp + lp

with g = tan(pi f) and r = 1 / Q. With no input and Q > 0, the pair
(s1, s2) never grows, so a mode rings down and stays stable however long
it runs.

Coefficients are derived once per call and frozen for the block: the
control inputs move slowly compared to a block, and the hot loop then only
touches the B-wide coefficient and state arrays. Those arrays live on the
stack for the duration of the call and are written back at the end.
*/

/// A batch of `B` resonant modes sharing one input.
#[derive(Debug, Clone)]
pub struct ModeBank<const B: usize> {
    state_1: [f32; B],
    state_2: [f32; B],
}

impl<const B: usize> Default for ModeBank<B> {
    fn default() -> Self {
        Self {
            state_1: [0.0; B],
            state_2: [0.0; B],
        }
    }
}

impl<const B: usize> ModeBank<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every mode's memory.
    pub fn init(&mut self) {
        self.state_1 = [0.0; B];
        self.state_2 = [0.0; B];
    }

    /// Sum of squared filter states over the batch.
    #[cfg(test)]
    pub(crate) fn state_energy(&self) -> f64 {
        self.state_1
            .iter()
            .zip(self.state_2.iter())
            .map(|(&s1, &s2)| (s1 as f64).powi(2) + (s2 as f64).powi(2))
            .sum()
    }

    /// Run one block through the batch.
    ///
    /// `frequency` is per mode as a fraction of the sample rate, `q` must be
    /// strictly positive. With `accumulate` the summed modes are added to
    /// `output`, otherwise they replace it. The block length is the shorter
    /// of `input` and `output`.
    ///
    /// `R` picks the tap: `LowPass` or `BandPass`. The other responses have
    /// no meaning for a mode and contribute silence.
    #[inline]
    pub fn process<R: Response>(
        &mut self,
        frequency: &[f32; B],
        q: &[f32; B],
        gain: &[f32; B],
        input: &[f32],
        output: &mut [f32],
        accumulate: bool,
    ) {
        if accumulate {
            self.run::<R, true>(frequency, q, gain, input, output);
        } else {
            self.run::<R, false>(frequency, q, gain, input, output);
        }
    }

    #[inline(always)]
    fn run<R: Response, const ADD: bool>(
        &mut self,
        frequency: &[f32; B],
        q: &[f32; B],
        gain: &[f32; B],
        input: &[f32],
        output: &mut [f32],
    ) {
        let mut g = [0.0f32; B];
        let mut r_plus_g = [0.0f32; B];
        let mut h = [0.0f32; B];
        for i in 0..B {
            g[i] = tan_exact(frequency[i]);
            let r = 1.0 / q[i];
            h[i] = 1.0 / (1.0 + r * g[i] + g[i] * g[i]);
            r_plus_g[i] = r + g[i];
        }
        let gain = *gain;
        let mut state_1 = self.state_1;
        let mut state_2 = self.state_2;

        for (x, out) in input.iter().zip(output.iter_mut()) {
            let s_in = *x;
            let mut s_out = 0.0;
            for i in 0..B {
                let hp = (s_in - r_plus_g[i] * state_1[i] - state_2[i]) * h[i];
                let bp = g[i] * hp + state_1[i];
                state_1[i] = g[i] * hp + bp;
                let lp = g[i] * bp + state_2[i];
                state_2[i] = g[i] * bp + lp;
                s_out += gain[i]
                    * match R::MODE {
                        FilterMode::LowPass => lp,
                        FilterMode::BandPass => bp,
                        FilterMode::BandPassNormalized | FilterMode::HighPass => 0.0,
                    };
            }
            if ADD {
                *out += s_out;
            } else {
                *out = s_out;
            }
        }

        self.state_1 = state_1;
        self.state_2 = state_2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::response::{BandPass, HighPass, LowPass};

    fn mode_energy<const B: usize>(bank: &ModeBank<B>, mode: usize) -> f64 {
        let s1 = bank.state_1[mode] as f64;
        let s2 = bank.state_2[mode] as f64;
        s1 * s1 + s2 * s2
    }

    fn impulse(len: usize) -> Vec<f32> {
        let mut buffer = vec![0.0; len];
        buffer[0] = 1.0;
        buffer
    }

    #[test]
    fn silent_modes_stay_silent() {
        let mut bank = ModeBank::<4>::new();
        let input = vec![0.0; 256];
        let mut output = vec![1.0; 256];
        bank.process::<BandPass>(
            &[0.01, 0.02, 0.03, 0.04],
            &[10.0; 4],
            &[1.0; 4],
            &input,
            &mut output,
            false,
        );
        assert!(output.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn state_never_grows_without_input() {
        let frequencies = [0.0005, 0.01, 0.1, 0.3, 0.45];
        let qs = [0.5, 0.7, 1.0, 10.0, 1000.0];
        let silence = vec![0.0f32; 10_000];
        let mut scratch = vec![0.0f32; 10_000];

        for &f in &frequencies {
            for &q in &qs {
                let mut bank = ModeBank::<1>::new();
                bank.process::<BandPass>(&[f], &[q], &[1.0], &[1.0, 0.3, -0.5], &mut [0.0; 3], false);
                let start = mode_energy(&bank, 0);
                assert!(start > 0.0);

                let mut previous = start;
                for chunk in silence.chunks(1) {
                    bank.process::<BandPass>(&[f], &[q], &[1.0], chunk, &mut scratch[..1], false);
                    let energy = mode_energy(&bank, 0);
                    assert!(
                        energy <= previous * (1.0 + 1e-5) + 1e-30,
                        "f={} q={}: state grew from {} to {}",
                        f,
                        q,
                        previous,
                        energy
                    );
                    previous = energy;
                }
                assert!(previous <= start, "f={} q={} diverged", f, q);
            }
        }
    }

    #[test]
    fn bandpass_rings_at_mode_frequency() {
        let f = 0.05;
        let mut bank = ModeBank::<1>::new();
        let input = impulse(2000);
        let mut output = vec![0.0; 2000];
        bank.process::<BandPass>(&[f], &[200.0], &[1.0], &input, &mut output, false);

        // Count zero crossings in the ringing tail.
        let tail = &output[100..];
        let crossings = tail
            .windows(2)
            .filter(|w| (w[0] <= 0.0) != (w[1] <= 0.0))
            .count();
        let expected = 2.0 * f * tail.len() as f32;
        assert!(
            (crossings as f32 - expected).abs() <= 4.0,
            "expected ~{} crossings, got {}",
            expected,
            crossings
        );
    }

    #[test]
    fn lowpass_passes_dc_bandpass_rejects_it() {
        let dc = vec![1.0; 4000];
        let mut lp_out = vec![0.0; 4000];
        let mut bp_out = vec![0.0; 4000];

        let mut lp_bank = ModeBank::<1>::new();
        lp_bank.process::<LowPass>(&[0.01], &[0.707], &[1.0], &dc, &mut lp_out, false);
        let mut bp_bank = ModeBank::<1>::new();
        bp_bank.process::<BandPass>(&[0.01], &[0.707], &[1.0], &dc, &mut bp_out, false);

        assert!((lp_out[3999] - 1.0).abs() < 1e-3, "lp settled at {}", lp_out[3999]);
        assert!(bp_out[3999].abs() < 1e-3, "bp settled at {}", bp_out[3999]);
    }

    #[test]
    fn reserved_responses_contribute_nothing() {
        let mut bank = ModeBank::<4>::new();
        let input = impulse(128);
        let mut output = vec![0.5; 128];
        bank.process::<HighPass>(&[0.1; 4], &[5.0; 4], &[1.0; 4], &input, &mut output, true);
        assert!(output.iter().all(|&s| s == 0.5));
        // The modes still ran.
        assert!(mode_energy(&bank, 0) > 0.0);
    }

    #[test]
    fn bank_energy_sums_its_modes() {
        let mut bank = ModeBank::<4>::new();
        assert_eq!(bank.state_energy(), 0.0);

        let input = impulse(64);
        let mut output = vec![0.0; 64];
        let frequencies = [0.01, 0.1, 0.2, 0.4];
        let qs = [2.0, 10.0, 50.0, 200.0];
        bank.process::<BandPass>(&frequencies, &qs, &[1.0; 4], &input, &mut output, false);
        let modes: f64 = (0..4).map(|mode| mode_energy(&bank, mode)).sum();
        assert!(modes > 0.0);
        assert!((bank.state_energy() - modes).abs() <= modes * 1e-12);

        bank.init();
        assert_eq!(bank.state_energy(), 0.0);
    }

    #[test]
    fn gains_weight_each_mode() {
        let input = impulse(512);
        let frequencies = [0.02, 0.05, 0.11, 0.2];
        let qs = [30.0; 4];

        let mut together = vec![0.0; 512];
        let mut bank = ModeBank::<4>::new();
        bank.process::<BandPass>(&frequencies, &qs, &[0.5, 0.0, 2.0, 0.0], &input, &mut together, false);

        let mut first = vec![0.0; 512];
        let mut third = vec![0.0; 512];
        ModeBank::<1>::new().process::<BandPass>(&[0.02], &[30.0], &[0.5], &input, &mut first, false);
        ModeBank::<1>::new().process::<BandPass>(&[0.11], &[30.0], &[2.0], &input, &mut third, false);

        for i in 0..512 {
            assert!((together[i] - (first[i] + third[i])).abs() < 1e-5);
        }
    }

    #[test]
    fn accumulate_adds_to_output() {
        let input = impulse(256);
        let params = ([0.03, 0.07, 0.13, 0.29], [12.0; 4], [1.0, 0.5, 0.25, 0.125]);

        let mut fresh = vec![0.0; 256];
        ModeBank::<4>::new().process::<BandPass>(&params.0, &params.1, &params.2, &input, &mut fresh, false);

        let mut added = vec![1.0; 256];
        ModeBank::<4>::new().process::<BandPass>(&params.0, &params.1, &params.2, &input, &mut added, true);

        for i in 0..256 {
            assert!((added[i] - (fresh[i] + 1.0)).abs() < 1e-6);
        }
    }

    #[test]
    fn state_persists_across_blocks() {
        let input = impulse(600);
        let params = ([0.004, 0.009, 0.021, 0.4], [50.0, 80.0, 3.0, 900.0], [1.0, -0.5, 0.25, 2.0]);

        let mut whole = vec![0.0; 600];
        ModeBank::<4>::new().process::<LowPass>(&params.0, &params.1, &params.2, &input, &mut whole, false);

        let mut split = vec![0.0; 600];
        let mut bank = ModeBank::<4>::new();
        let (head, tail) = split.split_at_mut(217);
        bank.process::<LowPass>(&params.0, &params.1, &params.2, &input[..217], head, false);
        bank.process::<LowPass>(&params.0, &params.1, &params.2, &input[217..], tail, false);

        assert_eq!(whole, split);
    }

    #[test]
    fn init_clears_memory() {
        let mut bank = ModeBank::<4>::new();
        let input = impulse(32);
        let mut output = vec![0.0; 32];
        bank.process::<BandPass>(&[0.1; 4], &[10.0; 4], &[1.0; 4], &input, &mut output, false);
        bank.init();
        let silence = vec![0.0; 32];
        bank.process::<BandPass>(&[0.1; 4], &[10.0; 4], &[1.0; 4], &silence, &mut output, false);
        assert!(output.iter().all(|&s| s == 0.0));
    }
}
