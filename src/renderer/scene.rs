//! Scene drawing for the basketball court and the paint pad

use glam::Vec2;
use std::f32::consts::TAU;

use super::{LineCap, LineStyle, Surface};
use crate::paint::{PaintPad, Rgba};
use crate::sim::{Ball, FeedbackEvent, FeedbackKind, GameState, Hoop};
use crate::tuning::CourtVariant;

const COURT: Rgba = Rgba::rgb(0x1a, 0x5f, 0x1a);
const FLOOR_LINE: Rgba = Rgba::new(255, 255, 255, 51);
const BACKBOARD: Rgba = Rgba::WHITE;
const BACKBOARD_EDGE: Rgba = Rgba::rgb(0x33, 0x33, 0x33);
const RIM: Rgba = Rgba::rgb(0xff, 0x6b, 0x35);
const NET: Rgba = Rgba::new(255, 255, 255, 153);
const BALL: Rgba = Rgba::rgb(0xff, 0x6b, 0x35);
const BALL_HIGHLIGHT: Rgba = Rgba::rgb(0xff, 0x8c, 0x42);
const BALL_SEAMS: Rgba = Rgba::new(0, 0, 0, 77);
const SHADOW: Rgba = Rgba::new(0, 0, 0, 51);
const AIM_LINE: Rgba = Rgba::new(255, 255, 255, 128);
const SWISH: Rgba = Rgba::rgb(0xff, 0xd2, 0x3f);
const MISS: Rgba = Rgba::rgb(0xff, 0x4d, 0x4d);

const NET_SEGMENTS: usize = 8;
/// How far feedback text drifts upward over its lifetime
const FEEDBACK_RISE: f32 = 40.0;

fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    Rgba {
        a: (color.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8,
        ..color
    }
}

/// Draw one frame of the game
pub fn draw_game<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let size = surface.size();

    surface.fill_rect(Vec2::ZERO, size, COURT);
    let floor_y = size.y - 60.0;
    surface.line(
        Vec2::new(0.0, floor_y),
        Vec2::new(size.x, floor_y),
        FLOOR_LINE,
        LineStyle::dashed(2.0, 10.0, 10.0),
    );

    draw_hoop(surface, &state.hoop, state.variant);
    draw_ball(surface, &state.ball);

    if state.gesture.is_dragging() {
        surface.line(
            state.ball.rest,
            state.ball.pos,
            AIM_LINE,
            LineStyle::dashed(2.0, 5.0, 5.0),
        );
    }

    surface.text(
        &format!("Score: {}", state.score),
        Vec2::new(size.x / 2.0, 40.0),
        Rgba::WHITE,
        24.0,
    );

    for event in &state.feedback {
        draw_feedback(surface, event);
    }
}

fn draw_hoop<S: Surface + ?Sized>(surface: &mut S, hoop: &Hoop, variant: CourtVariant) {
    let (min, max) = hoop.backboard_bounds();
    surface.fill_rect(min, max - min, BACKBOARD);
    surface.stroke_rect(min, max - min, BACKBOARD_EDGE, 3.0);

    // Shooter's square on a face-on board
    if variant == CourtVariant::Vertical {
        let center = hoop.backboard_center();
        surface.line(
            center - Vec2::new(30.0, 0.0),
            center + Vec2::new(30.0, 0.0),
            BACKBOARD_EDGE,
            LineStyle::solid(2.0),
        );
    }

    surface.stroke_circle(hoop.pos, hoop.rim_radius, RIM, 4.0);

    for i in 0..NET_SEGMENTS {
        let angle = i as f32 / NET_SEGMENTS as f32 * TAU;
        let dir = Vec2::new(angle.cos(), angle.sin());
        let start = hoop.pos + dir * hoop.rim_radius;
        let end = Vec2::new(
            hoop.pos.x + dir.x * hoop.rim_radius * 0.7,
            hoop.pos.y + hoop.net_height + dir.y * hoop.rim_radius * 0.3,
        );
        surface.line(start, end, NET, LineStyle::solid(2.0));
    }
}

fn draw_ball<S: Surface + ?Sized>(surface: &mut S, ball: &Ball) {
    let r = ball.radius;
    let p = ball.pos;

    surface.fill_ellipse(
        Vec2::new(p.x, p.y + r + 2.0),
        Vec2::new(r * 0.8, r * 0.4),
        SHADOW,
    );
    surface.fill_circle(p, r, BALL);
    surface.fill_circle(p - Vec2::splat(r * 0.3), r * 0.5, BALL_HIGHLIGHT);

    let seam = LineStyle {
        cap: LineCap::Round,
        ..LineStyle::solid(1.5)
    };
    surface.line(p - Vec2::new(r * 0.7, 0.0), p + Vec2::new(r * 0.7, 0.0), BALL_SEAMS, seam);
    surface.line(p - Vec2::new(0.0, r * 0.7), p + Vec2::new(0.0, r * 0.7), BALL_SEAMS, seam);
}

fn draw_feedback<S: Surface + ?Sized>(surface: &mut S, event: &FeedbackEvent) {
    let alpha = event.alpha();
    let (label, color) = match event.kind {
        FeedbackKind::Success => ("Swish!", SWISH),
        FeedbackKind::Miss => ("Miss", MISS),
    };
    let pos = event.pos - Vec2::new(0.0, FEEDBACK_RISE * (1.0 - alpha));
    surface.text(label, pos, with_alpha(color, alpha), 32.0);
}

/// Blit the paint pad
pub fn draw_pad<S: Surface + ?Sized>(surface: &mut S, pad: &PaintPad) {
    surface.put_pixels(Vec2::ZERO, pad.buffer());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList};

    fn game() -> GameState {
        GameState::new(CourtVariant::Vertical, 800, 600).unwrap()
    }

    fn aim_lines(list: &DrawList) -> Vec<(Vec2, Vec2)> {
        list.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line {
                    from, to, style, ..
                } if style.dash == Some([5.0, 5.0]) => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_court_background_first() {
        let mut list = DrawList::new(800.0, 600.0);
        draw_game(&mut list, &game());
        assert_eq!(
            list.commands[0],
            DrawCommand::FillRect {
                min: Vec2::ZERO,
                size: Vec2::new(800.0, 600.0),
                color: COURT
            }
        );
        assert_eq!(list.texts().collect::<Vec<_>>(), ["Score: 0"]);
    }

    #[test]
    fn test_background_covers_surface() {
        // Canvas resized but the court has not caught up yet
        let mut list = DrawList::new(1024.0, 768.0);
        draw_game(&mut list, &game());
        assert!(matches!(
            list.commands[0],
            DrawCommand::FillRect { size, .. } if size == Vec2::new(1024.0, 768.0)
        ));
    }

    #[test]
    fn test_ball_seams_are_round() {
        let mut list = DrawList::new(800.0, 600.0);
        draw_game(&mut list, &game());
        let seams: Vec<_> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { color, style, .. } if *color == BALL_SEAMS => Some(style.cap),
                _ => None,
            })
            .collect();
        assert_eq!(seams, [LineCap::Round, LineCap::Round]);
    }

    #[test]
    fn test_net_has_eight_strands() {
        let mut list = DrawList::new(800.0, 600.0);
        draw_game(&mut list, &game());
        let strands = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { color, .. } if *color == NET))
            .count();
        assert_eq!(strands, NET_SEGMENTS);
    }

    #[test]
    fn test_aim_line_only_while_dragging() {
        let mut state = game();
        let mut list = DrawList::new(800.0, 600.0);
        draw_game(&mut list, &state);
        assert!(aim_lines(&list).is_empty());

        assert!(state.pointer_down(state.ball.pos));
        state.pointer_move(state.ball.rest + Vec2::new(0.0, 40.0));
        list.clear();
        draw_game(&mut list, &state);

        let lines = aim_lines(&list);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, state.ball.rest);
        assert_eq!(lines[0].1, state.ball.pos);
    }

    #[test]
    fn test_feedback_fades() {
        let mut state = game();
        let mut event = FeedbackEvent::new(FeedbackKind::Success, Vec2::new(400.0, 120.0));
        event.remaining /= 2.0;
        state.feedback.push(event);

        let mut list = DrawList::new(800.0, 600.0);
        draw_game(&mut list, &state);
        let swish = list.commands.iter().find_map(|c| match c {
            DrawCommand::Text {
                text, color, pos, ..
            } if text == "Swish!" => Some((*color, *pos)),
            _ => None,
        });
        let (color, pos) = swish.unwrap();
        assert!((126..=128).contains(&color.a));
        assert!((pos.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_pad_is_blitted_whole() {
        let pad = PaintPad::new(400, 300).unwrap();
        let mut list = DrawList::new(400.0, 300.0);
        draw_pad(&mut list, &pad);
        assert_eq!(
            list.commands,
            vec![DrawCommand::PutPixels {
                origin: Vec2::ZERO,
                width: 400,
                height: 300
            }]
        );
    }
}
