//! Game screen: sky, pipes, bird, ground strip and the phase prompts

use super::canvas::Canvas;
use crate::consts::*;
use crate::sim::{GamePhase, GameState, Pipe};

const SKY_TOP: u32 = 0xFF4EC0CA;
const SKY_BOTTOM: u32 = 0xFFDDF3F5;
const PIPE_BODY: u32 = 0xFF5EBE3A;
const PIPE_EDGE: u32 = 0xFF2F6B1D;
const GROUND: u32 = 0xFFDED895;
const GROUND_STRIPE: u32 = 0xFF9BD658;
const GRASS: u32 = 0xFF73BF2E;
const BIRD_BODY: u32 = 0xFFF8D030;
const BIRD_BEAK: u32 = 0xFFF07020;
const TEXT: u32 = 0xFFFFFFFF;
const TEXT_ALERT: u32 = 0xFFFF4040;

/// Width of one ground stripe, also its scroll period
const STRIPE_W: i32 = 24;
const PIPE_CAP_H: i32 = 12;

/// Draw a full game frame for the current state
pub fn draw_game(canvas: &mut Canvas, state: &GameState) {
    draw_sky(canvas);
    for pipe in &state.pipes {
        draw_pipe(canvas, pipe);
    }
    draw_ground(canvas, state);
    draw_bird(canvas, state);
    draw_hud(canvas, state);
}

fn draw_sky(canvas: &mut Canvas) {
    let h = FLOOR_Y as i32;
    for y in 0..h {
        let t = y as f32 / h as f32;
        canvas.fill_rect(0, y, canvas.width() as i32, 1, lerp_color(SKY_TOP, SKY_BOTTOM, t));
    }
}

fn draw_pipe(canvas: &mut Canvas, pipe: &Pipe) {
    let x = pipe.x.round() as i32;
    let w = PIPE_WIDTH as i32;
    let top_end = (pipe.top_y + PIPE_HEIGHT).round() as i32;
    let top_start = pipe.top_y.round() as i32;
    let bottom_start = pipe.bottom_y.round() as i32;

    // Top segment hangs down to the gap, bottom segment rises from it
    canvas.fill_rect(x, top_start, w, top_end - top_start, PIPE_BODY);
    canvas.fill_rect(x, bottom_start, w, PIPE_HEIGHT as i32, PIPE_BODY);
    canvas.fill_rect(x - 2, top_end - PIPE_CAP_H, w + 4, PIPE_CAP_H, PIPE_BODY);
    canvas.fill_rect(x - 2, bottom_start, w + 4, PIPE_CAP_H, PIPE_BODY);

    canvas.stroke_rect(x, top_start, w, top_end - top_start, PIPE_EDGE);
    canvas.stroke_rect(x, bottom_start, w, PIPE_HEIGHT as i32, PIPE_EDGE);
    canvas.stroke_rect(x - 2, top_end - PIPE_CAP_H, w + 4, PIPE_CAP_H, PIPE_EDGE);
    canvas.stroke_rect(x - 2, bottom_start, w + 4, PIPE_CAP_H, PIPE_EDGE);
}

fn draw_ground(canvas: &mut Canvas, state: &GameState) {
    let top = FLOOR_Y as i32;
    let width = canvas.width() as i32;
    canvas.fill_rect(0, top, width, BASE_HEIGHT as i32, GROUND);
    canvas.fill_rect(0, top, width, 4, GRASS);

    // The strip only scrolls while the bird is flying
    let scroll = if state.phase == GamePhase::Running {
        ((state.time_ticks * state.pipe_speed as u64) % (STRIPE_W as u64 * 2)) as i32
    } else {
        0
    };
    let mut x = -scroll;
    while x < width {
        canvas.fill_rect(x, top + 4, STRIPE_W, 8, GROUND_STRIPE);
        x += STRIPE_W * 2;
    }
}

fn draw_bird(canvas: &mut Canvas, state: &GameState) {
    let b = state.bird.bounds();
    let (x, y) = (b.min.x.round() as i32, b.min.y.round() as i32);
    let (w, h) = (BIRD_WIDTH as i32, BIRD_HEIGHT as i32);

    canvas.fill_rect(x, y, w, h, BIRD_BODY);
    canvas.stroke_rect(x, y, w, h, 0xFF000000);
    // Eye and beak
    canvas.fill_rect(x + w - 10, y + 4, 6, 6, TEXT);
    canvas.fill_rect(x + w - 7, y + 6, 3, 3, 0xFF000000);
    canvas.fill_rect(x + w - 2, y + h / 2, 8, 6, BIRD_BEAK);
}

fn draw_hud(canvas: &mut Canvas, state: &GameState) {
    let cx = canvas.width() as i32 / 2;
    let mid = SCREEN_HEIGHT as i32 / 2;

    if state.started() {
        canvas.draw_text_centered(&state.score.to_string(), cx, 30, 8, TEXT);
    }
    if let Some(difficulty) = state.difficulty {
        canvas.draw_label(difficulty.as_str(), 12, 12, 3, TEXT);
    }

    match state.phase {
        GamePhase::SelectingDifficulty => {
            let menu = "SELECT DIFFICULTY: 1-EASY  2-NORMAL  3-HARD";
            canvas.draw_text_centered(menu, cx, mid - 20, 3, TEXT);
            canvas.draw_text_centered("OR SHOW 1-3 FINGERS", cx, mid + 10, 3, TEXT);
        }
        GamePhase::AwaitingStart => {
            canvas.draw_text_centered("RAISE ARM TO START", cx, mid - 60, 4, TEXT);
        }
        GamePhase::Running => {}
        GamePhase::GameOver => {
            canvas.draw_text_centered(
                "GAME OVER - RAISE ARM TO RESTART OR Q TO QUIT",
                cx,
                mid - 60,
                3,
                TEXT_ALERT,
            );
        }
    }
}

fn lerp_color(a: u32, b: u32, t: f32) -> u32 {
    let ch = |c: u32, shift: u32| ((c >> shift) & 0xFF) as f32;
    let mix = |shift: u32| {
        let v = ch(a, shift) + (ch(b, shift) - ch(a, shift)) * t;
        (v.round().clamp(0.0, 255.0) as u32) << shift
    };
    0xFF00_0000 | mix(16) | mix(8) | mix(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Difficulty;

    fn canvas() -> Canvas {
        Canvas::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[test]
    fn test_lerp_color_endpoints() {
        assert_eq!(lerp_color(SKY_TOP, SKY_BOTTOM, 0.0), SKY_TOP);
        assert_eq!(lerp_color(SKY_TOP, SKY_BOTTOM, 1.0), SKY_BOTTOM);
    }

    #[test]
    fn test_bird_drawn_at_its_position() {
        let mut c = canvas();
        let state = GameState::new(1);
        draw_game(&mut c, &state);
        // Centre of the bird body
        let px = c.pixel(BIRD_X as i32 - 4, state.bird.pos.y as i32);
        assert_eq!(px, Some(BIRD_BODY));
    }

    #[test]
    fn test_pipe_and_gap_pixels() {
        let mut c = canvas();
        let mut state = GameState::new(1);
        state.select_difficulty(Difficulty::Normal);
        state.pipes = vec![Pipe::new(400.0, 250, 200)];
        draw_game(&mut c, &state);

        let mid_x = 400 + PIPE_WIDTH as i32 / 2;
        // Inside the top segment, well above the cap
        assert_eq!(c.pixel(mid_x, 60), Some(PIPE_BODY));
        // Gap centre shows sky
        assert_ne!(c.pixel(mid_x, 250), Some(PIPE_BODY));
        // Inside the bottom segment, below its cap
        assert_eq!(c.pixel(mid_x, 400), Some(PIPE_BODY));
    }

    #[test]
    fn test_ground_covers_floor() {
        let mut c = canvas();
        draw_game(&mut c, &GameState::new(3));
        let y = SCREEN_HEIGHT as i32 - 10;
        assert_eq!(c.pixel(5, y), Some(GROUND));
    }
}
