//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use super::*;

fn axis_len(orientation: Orientation, r: Frame) -> Real {
    match orientation {
        Orientation::Horizontal => r.size.x,
        Orientation::Vertical => r.size.y,
    }
}

/// Length of a thumb showing `page` units out of a `range` long value range.
pub(crate) fn thumb_len(track_len: Real, page: Real, range: Real, min_thumb: Real) -> Real {
    if track_len <= 0.0 {
        return 0.0;
    }
    let total = range + page;
    let len = if total > 0.0 { track_len * page / total } else { track_len };
    len.max(min_thumb).min(track_len)
}

/// Thumb rectangle for value `n` in `[min, max]`.
///
/// Horizontal tracks run left to right. Vertical tracks run top to bottom, so `min` puts the thumb at
/// the top edge.
pub(crate) fn thumb_rect(orientation: Orientation, track: Frame, n: Real, min: Real, max: Real, len: Real) -> Frame {
    let base = axis_len(orientation, track);
    let travel = (base - len).max(0.0);
    let t = if max > min { ((n - min) / (max - min)).clamp(0.0, 1.0) } else { 0.0 };
    let offset = travel * t;
    match orientation {
        Orientation::Horizontal => Frame::new(vec2f(track.pos.x + offset, track.pos.y), vec2f(len, track.size.y)),
        Orientation::Vertical => Frame::new(vec2f(track.pos.x, track.top() - len - offset), vec2f(track.size.x, len)),
    }
}

/// Value whose thumb is centered on `p`, clamped to `[min, max]`.
pub(crate) fn value_at(orientation: Orientation, track: Frame, p: Vec2f, min: Real, max: Real, len: Real) -> Real {
    let base = axis_len(orientation, track);
    let travel = base - len;
    if travel <= 0.0 || max <= min {
        return min;
    }
    let along = match orientation {
        Orientation::Horizontal => p.x - track.left() - len * 0.5,
        Orientation::Vertical => track.top() - p.y - len * 0.5,
    };
    min + (along / travel).clamp(0.0, 1.0) * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumb_is_clamped_to_track_and_minimum() {
        assert_eq!(thumb_len(100.0, 50.0, 150.0, 8.0), 25.0);
        assert_eq!(thumb_len(100.0, 1.0, 1000.0, 8.0), 8.0);
        assert_eq!(thumb_len(100.0, 0.0, 0.0, 8.0), 100.0);
    }

    #[test]
    fn vertical_thumb_starts_at_top() {
        let track = Frame::new(vec2f(0.0, 0.0), vec2f(10.0, 100.0));
        let top = thumb_rect(Orientation::Vertical, track, 0.0, 0.0, 200.0, 20.0);
        assert_eq!(top.top(), 100.0);
        let bottom = thumb_rect(Orientation::Vertical, track, 200.0, 0.0, 200.0, 20.0);
        assert_eq!(bottom.bottom(), 0.0);
        let mid = thumb_rect(Orientation::Vertical, track, 100.0, 0.0, 200.0, 20.0);
        assert_eq!(mid.bottom(), 40.0);
    }

    #[test]
    fn pointer_maps_back_to_value() {
        let track = Frame::new(vec2f(0.0, 0.0), vec2f(110.0, 10.0));
        let thumb = thumb_rect(Orientation::Horizontal, track, 30.0, 0.0, 100.0, 10.0);
        let n = value_at(Orientation::Horizontal, track, thumb.center(), 0.0, 100.0, 10.0);
        assert!((n - 30.0).abs() < 1e-4);
        assert_eq!(value_at(Orientation::Horizontal, track, vec2f(-50.0, 0.0), 0.0, 100.0, 10.0), 0.0);
    }
}
