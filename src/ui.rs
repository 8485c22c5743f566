use std::io::Write;

use timer_core::TimerFace;

/// Redraw the face on a single terminal line.
pub fn draw_face<W: Write>(out: &mut W, face: &TimerFace) -> std::io::Result<()> {
    let marker = if face.is_running() { "RUNNING" } else { "IDLE   " };
    write!(out, "\r  {}  [{}]  ", face.display_text(), marker)?;
    out.flush()
}

pub fn draw_help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "COUNTDOWN")?;
    writeln!(out, "  u / d      add / remove one second")?;
    writeln!(out, "  u*N / d*N  hold the button for N repeats (6+ steps by 5, 11+ by 10, 16+ by 15)")?;
    writeln!(out, "  s          start, or cancel a running countdown")?;
    writeln!(out, "  r          redraw")?;
    writeln!(out, "  h / ?      this help")?;
    writeln!(out, "  q          quit")?;
    out.flush()
}
