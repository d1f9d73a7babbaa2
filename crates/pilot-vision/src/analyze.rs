//! Direction classification from a single frame.
//!
//! The detection is a fixed heuristic: grayscale, a small smoothing kernel,
//! a hard binarization, then connected components inside a near-field band.
//! The largest dark region's horizontal centroid decides the direction.

use std::collections::VecDeque;

use pilot_core::DirectionLabel;

use crate::Frame;

/// Intensities at or below this value count as line after smoothing.
const LINE_THRESHOLD: u8 = 150;

/// Classify the steering direction visible in one frame.
///
/// Pure and total: degenerate input (mismatched payload, empty band, zero
/// detection area) yields [`DirectionLabel::NoLine`].
pub fn analyze(frame: &Frame) -> DirectionLabel {
    let width = frame.width as usize;
    let height = frame.height as usize;
    if width == 0 || height == 0 || !frame.is_valid() {
        return DirectionLabel::NoLine;
    }

    let gray = grayscale(&frame.data, width, height);
    let smoothed = smooth(&gray, width, height);

    // Analysis band occupies rows [0.60*H, 0.75*H): a short lookahead just
    // ahead of the wheels.
    let band_top = height * 3 / 5;
    let band_bottom = height * 3 / 4;
    let band_rows = band_bottom.saturating_sub(band_top);
    if band_rows == 0 {
        return DirectionLabel::NoLine;
    }

    let mask: Vec<bool> = smoothed[band_top * width..band_bottom * width]
        .iter()
        .map(|&v| v <= LINE_THRESHOLD)
        .collect();

    match largest_component(&mask, width, band_rows) {
        Some(blob) if blob.area > 0 => classify(blob.x_sum, blob.area, frame.width),
        _ => DirectionLabel::NoLine,
    }
}

/// Place the centroid cx = x_sum / area against the cut points 0.25*W,
/// 0.40*W, 0.60*W, and 0.75*W.
///
/// The comparisons stay in integers so a centroid exactly on a cut lands on
/// the documented side: left of 0.40*W is LEFT, right of 0.60*W is RIGHT,
/// everything between (both cuts included) is STRAIGHT.
fn classify(x_sum: u64, area: u64, width: u32) -> DirectionLabel {
    let w = width as u64;
    if x_sum * 4 < w * area {
        DirectionLabel::LeftHard
    } else if x_sum * 5 < 2 * w * area {
        DirectionLabel::Left
    } else if x_sum * 4 > 3 * w * area {
        DirectionLabel::RightHard
    } else if x_sum * 5 > 3 * w * area {
        DirectionLabel::Right
    } else {
        DirectionLabel::Straight
    }
}

fn grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    for (i, out) in gray.iter_mut().enumerate() {
        let r = rgb[i * 3] as u32;
        let g = rgb[i * 3 + 1] as u32;
        let b = rgb[i * 3 + 2] as u32;
        *out = ((r * 299 + g * 587 + b * 114) / 1000) as u8;
    }
    gray
}

/// Separable 5-tap binomial smoothing, edges clamped.
fn smooth(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    const KERNEL: [u32; 5] = [1, 4, 6, 4, 1];
    const KERNEL_SUM: u32 = 16;

    let mut horizontal = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0u32;
            for (k, &weight) in KERNEL.iter().enumerate() {
                let sx = (x as isize + k as isize - 2).clamp(0, width as isize - 1) as usize;
                acc += weight * gray[y * width + sx] as u32;
            }
            horizontal[y * width + x] = (acc / KERNEL_SUM) as u8;
        }
    }

    let mut smoothed = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0u32;
            for (k, &weight) in KERNEL.iter().enumerate() {
                let sy = (y as isize + k as isize - 2).clamp(0, height as isize - 1) as usize;
                acc += weight * horizontal[sy * width + x] as u32;
            }
            smoothed[y * width + x] = (acc / KERNEL_SUM) as u8;
        }
    }
    smoothed
}

struct Blob {
    area: u64,
    x_sum: u64,
}

/// 8-connected component labeling over the band mask; returns the component
/// of maximum pixel area, first found winning ties.
fn largest_component(mask: &[bool], width: usize, rows: usize) -> Option<Blob> {
    let mut visited = vec![false; mask.len()];
    let mut best: Option<Blob> = None;
    let mut queue = VecDeque::new();

    for start in 0..mask.len() {
        if !mask[start] || visited[start] {
            continue;
        }

        let mut area = 0u64;
        let mut x_sum = 0u64;
        visited[start] = true;
        queue.push_back(start);

        while let Some(index) = queue.pop_front() {
            let x = index % width;
            let y = index / width;
            area += 1;
            x_sum += x as u64;

            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx < 0 || ny < 0 || nx >= width as isize || ny >= rows as isize {
                        continue;
                    }
                    let neighbor = ny as usize * width + nx as usize;
                    if mask[neighbor] && !visited[neighbor] {
                        visited[neighbor] = true;
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        let replace = match &best {
            Some(blob) => area > blob.area,
            None => true,
        };
        if replace {
            best = Some(Blob { area, x_sum });
        }
    }

    best
}
