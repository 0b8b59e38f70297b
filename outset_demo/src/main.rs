// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outset grid demos, written out as SVG files.
mod svg;

use kurbo::{Point, Rect, Size, Vec2};
use outset::{
    AspectPolicy, Canvas, Corner, CornerInsetSpec, Facet, Figure, Glyph, GlyphChoice, GridData,
    GridOptions, InsetOptions, InsetPlacement, IqrBounds, LeaderTweak, MarkerStyle, MarqueeConfig,
    MarqueeKeys, MarqueeOverrides, OutsetError, OutsetGrid, SceneFigure, ScenePanel, Split, Strip,
    Table, edge_stub_style, inset_outsets, marqueeplot, rescale_clip_outliers,
    stub_all_clipped_values,
};
use peniko::Color;
use peniko::color::palette::css;
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let demos: [(&str, fn() -> Result<SceneFigure, OutsetError>); 5] = [
        ("outset_grid.svg", grid_demo),
        ("outset_inset.svg", inset_demo),
        ("outset_frames.svg", frames_demo),
        ("outset_single.svg", single_panel_demo),
        ("outset_stubs.svg", stubs_demo),
    ];
    for (path, demo) in demos {
        let figure = demo().expect("demo figure");
        std::fs::write(path, svg::figure_to_svg(&figure)).expect("write demo svg");
        info!(path, "wrote demo");
    }
}

/// Three noisy clusters, tagged by name.
fn clusters() -> Table {
    let centers = [("a", 2.0, 3.0), ("b", 6.0, 8.0), ("c", 9.0, 2.5)];
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut names = Vec::new();
    // Small linear congruential generator so the demo is reproducible.
    let mut state: u32 = 0x2545_f491;
    let mut jitter = || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        f64::from(state >> 8) / f64::from(1_u32 << 24) - 0.5
    };
    for (name, cx, cy) in centers {
        for _ in 0..25 {
            xs.push(cx + 1.2 * jitter());
            ys.push(cy + 0.8 * jitter());
            names.push(name);
        }
    }

    Table::new()
        .with_numeric("x", xs)
        .and_then(|t| t.with_numeric("y", ys))
        .and_then(|t| t.with_categorical("cluster", names))
        .expect("columns have equal length")
}

fn dots(color: Color) -> MarkerStyle {
    MarkerStyle {
        color,
        accent: css::WHITE,
        size: 3.0,
        z_order: outset::DATA_POINTS,
    }
}

fn scatter_facets(grid: &mut OutsetGrid<SceneFigure>) -> Result<(), OutsetError> {
    let colors = Split::new(css::DIM_GRAY, css::BLACK);
    grid.map(|panel, role, table| {
        if let Ok(points) = table.points("x", "y") {
            panel.scatter(&points, &dots(*colors.get(role)));
        }
    })
}

fn cluster_grid() -> Result<OutsetGrid<SceneFigure>, OutsetError> {
    let options = GridOptions::xy("x", "y")
        .with_hue(Facet::column("cluster"))
        .with_marquee(MarqueeOverrides::default().with_glyph_size(18.0));
    let mut grid = OutsetGrid::new(SceneFigure::default(), GridData::Table(clusters()), options)?;
    scatter_facets(&mut grid)?;
    Ok(grid)
}

fn grid_demo() -> Result<SceneFigure, OutsetError> {
    let mut grid = cluster_grid()?;
    grid.annotate_all(AspectPolicy::Equalize)?;
    Ok(grid.into_figure())
}

fn inset_demo() -> Result<SceneFigure, OutsetError> {
    let mut grid = cluster_grid()?;
    grid.annotate_all(AspectPolicy::Equalize)?;
    let placement = InsetPlacement::Corner(
        Corner::SouthEast,
        CornerInsetSpec::default()
            .with_grid_size(0.45)
            .with_margin(Vec2::new(0.02, 0.02)),
    );
    let options = InsetOptions {
        strip: Strip {
            spines: true,
            ..Strip::default()
        },
        equalize_aspect: true,
    };
    inset_outsets(&mut grid, &placement, &options)?;
    Ok(grid.into_figure())
}

fn frames_demo() -> Result<SceneFigure, OutsetError> {
    let frames = vec![
        ("left".to_string(), Rect::new(0.5, 0.5, 2.0, 1.5)),
        ("right".to_string(), Rect::new(7.0, 3.0, 8.5, 6.0)),
    ];
    let mut grid = OutsetGrid::new(
        SceneFigure::default(),
        GridData::NamedFrames(frames),
        GridOptions::default().with_marquee(
            MarqueeOverrides::default().with_glyph(GlyphChoice::AlphabeticalBadges),
        ),
    )?;
    let wave: Vec<Point> = (0..120)
        .map(|i| {
            let x = f64::from(i) / 12.0;
            Point::new(x, 3.0 + 2.5 * (x * 1.3).sin())
        })
        .collect();
    grid.broadcast(|panel, _| panel.scatter(&wave, &dots(css::STEEL_BLUE)));
    grid.annotate_all(AspectPolicy::Equalize)?;
    Ok(grid.into_figure())
}

fn single_panel_demo() -> Result<SceneFigure, OutsetError> {
    let mut figure = SceneFigure::new(Size::new(5.0, 4.0));
    let index = figure.add_panel(Rect::new(0.1, 0.1, 0.9, 0.9));
    let panel: &mut ScenePanel = &mut figure.panels_mut()[index];
    let table = clusters();
    panel.scatter(&table.points("x", "y")?, &dots(css::DIM_GRAY));

    let keys = MarqueeKeys::new("x", "y")
        .with_hue("cluster")
        .with_outset("cluster");
    let config = MarqueeConfig::default()
        .with_glyph(GlyphChoice::RomanBadges { upper: true })
        .with_leader_tweak(LeaderTweak::Reflect {
            horizontal: true,
            vertical: false,
        });
    let mut glyphs = config.glyph.factory();
    marqueeplot(panel, &table, &keys, &config, glyphs.as_deref_mut())?;
    Ok(figure)
}

fn stubs_demo() -> Result<SceneFigure, OutsetError> {
    let mut figure = SceneFigure::new(Size::new(5.0, 4.0));
    let index = figure.add_panel(Rect::new(0.15, 0.15, 0.85, 0.85));
    let panel: &mut ScenePanel = &mut figure.panels_mut()[index];
    let mut points = clusters().points("x", "y")?;
    points.extend([Point::new(60.0, 4.0), Point::new(5.0, -40.0), Point::new(-30.0, 25.0)]);
    panel.scatter(&points, &dots(css::DIM_GRAY));

    let rule = IqrBounds::default();
    rescale_clip_outliers(panel, &points, &rule, &rule, 0.1)?;
    let parked = stub_all_clipped_values(panel, &points, &edge_stub_style(css::RED), 0.1)?;
    for (&at, &original) in parked.iter().zip(&points) {
        if at != original {
            panel.draw_marker(at, &Glyph::Dot, &dots(css::RED));
        }
    }
    Ok(figure)
}
