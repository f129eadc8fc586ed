//! Peak detection shared by every estimation method.
//!
//! Peaks are selected the way SciPy's `find_peaks` does with `height` and
//! `distance`: strict local maxima (the middle of flat tops), at or above a
//! height, thinned by keeping the tallest within each refractory window.

/// Seconds that must separate two detected beats.
pub const REFRACTORY_PERIOD: f64 = 0.4;

/// Standard deviations above the mean that a peak must reach.
pub const THRESHOLD_DEVIATIONS: f64 = 0.5;

/// Rectify a signal and find the indices of its beats.
///
/// The threshold is the mean plus half a standard deviation of the rectified
/// signal.
pub fn detect(signal: &[f64], sample_rate: f64) -> Vec<usize> {
    let rectified: Vec<f64> = signal.iter().map(|v| v.abs()).collect();

    let Some((mean, deviation)) = mean_deviation(&rectified) else {
        return Vec::new();
    };

    let threshold = mean + THRESHOLD_DEVIATIONS * deviation;
    let distance = ((REFRACTORY_PERIOD * sample_rate) as usize).max(1);

    find_peaks(&rectified, threshold, distance)
}

/// Beats per minute from the mean interval between peaks.
///
/// Returns `None` for fewer than two peaks.
pub fn beats_per_minute(peaks: &[usize], sample_rate: f64) -> Option<f64> {
    let (&first, &last) = (peaks.first()?, peaks.last()?);

    if peaks.len() < 2 {
        return None;
    }

    let mean_interval = (last - first) as f64 / (peaks.len() - 1) as f64 / sample_rate;

    Some(60.0 / mean_interval)
}

/// Indices of local maxima at least `height` tall and at least `distance`
/// samples apart, in ascending order.
///
/// Where two maxima are closer than `distance`, the taller is kept; between
/// equally tall maxima the later one wins.
pub fn find_peaks(x: &[f64], height: f64, distance: usize) -> Vec<usize> {
    let peaks: Vec<usize> = local_maxima(x)
        .into_iter()
        .filter(|&i| x[i] >= height)
        .collect();

    if distance <= 1 {
        return peaks;
    }

    let mut priority: Vec<usize> = (0..peaks.len()).collect();
    priority.sort_by(|&a, &b| x[peaks[a]].total_cmp(&x[peaks[b]]));

    let mut keep = vec![true; peaks.len()];

    for &j in priority.iter().rev() {
        if !keep[j] {
            continue;
        }

        for k in (0..j).rev() {
            if peaks[j] - peaks[k] >= distance {
                break;
            }
            keep[k] = false;
        }

        for k in j + 1..peaks.len() {
            if peaks[k] - peaks[j] >= distance {
                break;
            }
            keep[k] = false;
        }
    }

    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(i, keep)| keep.then_some(i))
        .collect()
}

/// Indices of samples greater than both neighbours. A flat top yields its
/// middle sample (rounding down). The first and last samples never qualify.
fn local_maxima(x: &[f64]) -> Vec<usize> {
    let mut maxima = Vec::new();

    if x.len() < 3 {
        return maxima;
    }

    let last = x.len() - 1;
    let mut i = 1;

    while i < last {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;

            while ahead < last && x[ahead] == x[i] {
                ahead += 1;
            }

            if x[ahead] < x[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }

        i += 1;
    }

    maxima
}

/// Mean and population standard deviation.
fn mean_deviation(x: &[f64]) -> Option<(f64, f64)> {
    if x.is_empty() {
        return None;
    }

    let n = x.len() as f64;
    let mean = x.iter().sum::<f64>() / n;
    let variance = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some((mean, variance.sqrt()))
}
