use crate::constants::*;
use crate::input::snake_cell_rect;
use std::f64::consts::TAU;
use studio_core::decor::Decor;
use studio_core::snake::SnakeGame;
use studio_core::SNAKE_GRID_SIZE;
use web_sys as web;

pub fn draw_snake(ctx: &web::CanvasRenderingContext2d, game: &SnakeGame, width: f64, height: f64) {
    let board = SNAKE_BOARD_PX.min(width);
    let cell = board / SNAKE_GRID_SIZE as f64;

    ctx.set_fill_style_str("#000");
    ctx.fill_rect(0.0, 0.0, width, height);

    ctx.set_stroke_style_str(SNAKE_GRID_STROKE);
    ctx.set_line_width(1.0);
    for i in 0..=SNAKE_GRID_SIZE {
        let p = i as f64 * cell;
        ctx.begin_path();
        ctx.move_to(p, 0.0);
        ctx.line_to(p, board);
        ctx.stroke();
        ctx.begin_path();
        ctx.move_to(0.0, p);
        ctx.line_to(board, p);
        ctx.stroke();
    }

    for (i, seg) in game.body().enumerate() {
        let [x, y, w, h] = snake_cell_rect(seg, board);
        ctx.set_fill_style_str(if i == 0 { SNAKE_HEAD_FILL } else { SNAKE_BODY_FILL });
        ctx.fill_rect(x, y, w, h);
    }

    let [x, y, w, h] = snake_cell_rect(game.food(), board);
    ctx.set_fill_style_str(SNAKE_FOOD_FILL);
    ctx.fill_rect(x, y, w, h);

    ctx.set_fill_style_str(SNAKE_HEAD_FILL);
    ctx.set_font("16px monospace");
    let status = if game.won() {
        "🎉 YOU WIN! 🎉"
    } else if game.started() {
        "Eat the red food to win!"
    } else {
        "Press ENTER or click START"
    };
    _ = ctx.fill_text(status, 10.0, board + 30.0);
}

pub fn draw_decor(ctx: &web::CanvasRenderingContext2d, decor: &Decor, width: f64, height: f64) {
    ctx.clear_rect(0.0, 0.0, width, height);
    ctx.set_fill_style_str(MATRIX_GREEN);

    // corner glyphs
    for g in decor.corners.glyphs() {
        let p = g.position(width as f32, height as f32);
        ctx.set_global_alpha(g.opacity as f64);
        ctx.set_font(&format!("{:.0}px monospace", g.size_px));
        _ = ctx.fill_text(&g.glyph.to_string(), p.x as f64, p.y as f64);
    }

    // trail, oldest first so the newest dot sits on top
    let points: Vec<_> = decor.trail.points().collect();
    for p in points.iter().rev() {
        let r = TRAIL_DOT_PX * 0.5 * p.size as f64;
        ctx.set_global_alpha(p.opacity as f64);
        ctx.begin_path();
        _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, r, 0.0, TAU);
        ctx.fill();
    }

    ctx.set_font(PARTICLE_FONT);
    for p in decor.trail.particles() {
        ctx.set_global_alpha(p.opacity as f64);
        _ = ctx.fill_text(&p.glyph.to_string(), p.pos.x as f64, p.pos.y as f64);
    }

    if let Some(c) = decor.trail.cursor() {
        let r = if decor.trail.pressed() {
            CURSOR_RADIUS_PX * 0.75
        } else {
            CURSOR_RADIUS_PX
        };
        ctx.set_global_alpha(1.0);
        ctx.set_shadow_blur(20.0);
        ctx.set_shadow_color(MATRIX_GREEN);
        ctx.begin_path();
        _ = ctx.arc(c.x as f64, c.y as f64, r, 0.0, TAU);
        ctx.fill();
        ctx.set_shadow_blur(0.0);
    }
    ctx.set_global_alpha(1.0);
}
