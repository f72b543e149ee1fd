// TUI rendering: potential sparkline + spike/reset raster + status panel.

use std::io::Stdout;

use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Text,
    widgets::{Block, Borders, Paragraph, Sparkline},
    Terminal,
};

use crate::app::App;
use crate::backend::NeuronBackend;

/// Draws the UI each frame:
/// - Top: membrane potential (raw register value), scaled so the threshold is the ceiling.
/// - Middle: spike and reset rows aligned with the sparkline columns.
/// - Bottom: scenario, tick, potential (raw + real), verdict, controls.
pub fn draw<B: NeuronBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &App<B>,
) -> anyhow::Result<()> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Min(6),
                    Constraint::Length(4),
                    Constraint::Length(5),
                ]
                .as_ref(),
            )
            .split(f.size());

        let threshold = app.backend.threshold();
        let data: Vec<u64> = app.potentials.iter().copied().collect();
        let ceiling = data.iter().copied().max().unwrap_or(0).max(threshold).max(1);
        let sparkline = Sparkline::default()
            .block(
                Block::default()
                    .title(format!("Potential  (time →, ceiling {ceiling})"))
                    .borders(Borders::ALL),
            )
            .data(&data)
            .max(ceiling)
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(sparkline, chunks[0]);

        let spikes: String = app.spikes.iter().collect();
        let resets: String = app.resets.iter().collect();
        let raster = Paragraph::new(Text::from(format!("{spikes}\n{resets}")))
            .block(Block::default().title("Spike / Reset").borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(raster, chunks[1]);

        let format = app.backend.format();
        let (tick, potential, spike) = match app.last {
            Some(r) => (r.tick, r.potential, r.spike),
            None => (0, 0, false),
        };
        let status = format!(
            "Scenario: {} | Format: {} | Tick: {}/{} | Potential: {} ({:.4}) | Threshold: {} | Spike: {}\n\
             Verdict: {} | Running: {}\n\
             Controls: [s] Step  [r] Run/Pause  [x] Reset  [n] Next scenario  [q] Quit",
            app.backend.label(),
            format,
            tick,
            app.backend.duration(),
            potential,
            format.to_real(potential),
            threshold,
            if spike { "yes" } else { "no" },
            app.verdict.as_deref().unwrap_or("-"),
            if app.running { "yes" } else { "no" }
        );
        let status_widget = Paragraph::new(status)
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(status_widget, chunks[2]);
    })?;
    Ok(())
}
