use smallvec::SmallVec;

pub type TickValues = SmallVec<[f64; 16]>;

/// Tick count used by both chart axes.
pub const DEFAULT_TICK_COUNT: usize = 10;

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Index bounds and increment of a 1/2/5 x 10^k tick sequence.
///
/// A negative increment means "divide by `-inc`", which keeps fractional
/// steps exact for small domains.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TickPlan {
    first: i64,
    last: i64,
    increment: f64,
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn tick_plan(start: f64, stop: f64, count: f64) -> TickPlan {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (first, last, increment) = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut first = round_half_up(start * inc);
        let mut last = round_half_up(stop * inc);
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        (first, last, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut first = round_half_up(start / inc);
        let mut last = round_half_up(stop / inc);
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        (first, last, inc)
    };

    if last < first && (0.5..2.0).contains(&count) {
        return tick_plan(start, stop, count * 2.0);
    }

    TickPlan {
        first: first as i64,
        last: last as i64,
        increment,
    }
}

fn tick_at(index: i64, increment: f64) -> f64 {
    if increment < 0.0 {
        index as f64 / -increment
    } else {
        index as f64 * increment
    }
}

/// Round tick values between `start` and `stop`, ordered from `start` to `stop`.
pub fn tick_values(start: f64, stop: f64, count: usize) -> TickValues {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return TickValues::new();
    }
    if start == stop {
        return smallvec::smallvec![start];
    }

    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let plan = tick_plan(low, high, count as f64);
    if plan.last < plan.first {
        return TickValues::new();
    }

    let mut values: TickValues = (plan.first..=plan.last)
        .map(|index| tick_at(index, plan.increment))
        .collect();
    if reverse {
        values.reverse();
    }
    values
}

/// Spacing between consecutive values of [`tick_values`].
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return 0.0;
    }
    let (low, high) = if stop < start { (stop, start) } else { (start, stop) };
    let plan = tick_plan(low, high, count as f64);
    if plan.increment < 0.0 {
        1.0 / -plan.increment
    } else {
        plan.increment
    }
}

/// Formats a tick with the fixed precision implied by `step` and comma
/// thousands separators, e.g. `1,980` or `2.5`.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step.is_finite() && step > 0.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.push('−');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{format_tick, tick_step, tick_values};

    #[test]
    fn ticks_use_round_steps() {
        let ticks = tick_values(0.5, 8.5, 10);
        assert_eq!(ticks.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn fractional_steps_stay_exact() {
        let ticks = tick_values(0.0, 1.0, 10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
        assert_eq!(tick_step(0.0, 1.0, 10), 0.1);
    }

    #[test]
    fn reversed_domain_yields_reversed_ticks() {
        let ticks = tick_values(90.0, 30.0, 10);
        assert_eq!(ticks.first().copied(), Some(90.0));
        assert_eq!(ticks.last().copied(), Some(30.0));
    }

    #[test]
    fn formatting_groups_thousands_and_keeps_step_precision() {
        assert_eq!(format_tick(1980.0, 5.0), "1,980");
        assert_eq!(format_tick(2.5, 0.5), "2.5");
        assert_eq!(format_tick(3.0, 0.5), "3.0");
        assert_eq!(format_tick(-12.0, 2.0), "−12");
        assert_eq!(format_tick(0.0, 1.0), "0");
    }
}
