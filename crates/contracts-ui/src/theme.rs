/// Stylesheet for every `cr-` class rendered by the component tree.
pub fn styles() -> &'static str {
    r#"
:root {
  --bg: #f4f5f8;
  --panel: #ffffff;
  --panel-border: #dfe3ea;
  --text: #1f2430;
  --muted: #687087;
  --indigo: #4f46e5;
  --indigo-strong: #4338ca;
  --red: #dc2626;
  --red-strong: #b91c1c;
}
* { box-sizing: border-box; }
html, body { margin: 0; min-height: 100%; background: var(--bg); color: var(--text); }
body { font-family: "Inter", -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; }
.cr-app { min-height: 100vh; display: flex; flex-direction: column; }
.cr-topbar {
  display: flex;
  gap: 1.5rem;
  align-items: center;
  padding: 0.9rem 1.25rem;
  background: #1e1b4b;
}
.cr-brand { color: #fff; font-weight: 700; text-decoration: none; }
.cr-nav { display: flex; gap: 0.5rem; }
.cr-nav-link { color: #c7d2fe; text-decoration: none; padding: 0.35rem 0.6rem; border-radius: 6px; }
.cr-nav-link.active, .cr-nav-link:hover { color: #fff; background: rgba(255, 255, 255, 0.12); }
.cr-main { width: 100%; max-width: 1100px; margin: 0 auto; padding: 1.25rem; }
.cr-view-header { display: flex; justify-content: space-between; align-items: center; gap: 1rem; }
.cr-card {
  background: var(--panel);
  border: 1px solid var(--panel-border);
  border-radius: 10px;
  padding: 1rem;
  margin-top: 1rem;
}
.cr-participant dl { margin: 0; }
.cr-participant dt { font-size: 0.8rem; color: var(--muted); margin-top: 0.6rem; }
.cr-participant dd { margin: 0.2rem 0 0; }
.cr-participant pre { white-space: pre-wrap; word-break: break-all; font-size: 0.8rem; }
.cr-table { width: 100%; border-collapse: collapse; margin-top: 1rem; background: var(--panel); }
.cr-table th, .cr-table td { text-align: left; padding: 0.6rem 0.8rem; }
.cr-row.even { background: #ffffff; }
.cr-row.odd { background: #f1f2f7; }
.cr-btn {
  appearance: none;
  border: 1px solid transparent;
  border-radius: 6px;
  padding: 0.45rem 0.8rem;
  font: inherit;
  cursor: pointer;
  text-decoration: none;
}
.cr-btn[disabled] { opacity: 0.5; cursor: not-allowed; }
.cr-btn.primary { background: var(--indigo); color: #fff; }
.cr-btn.primary:hover { background: var(--indigo-strong); }
.cr-btn.danger { background: var(--red); color: #fff; }
.cr-btn.danger:hover { background: var(--red-strong); }
.cr-btn.subtle { background: #fff; border-color: var(--panel-border); color: var(--text); }
.cr-field { display: grid; gap: 0.3rem; margin-top: 0.6rem; }
.cr-field label { font-size: 0.85rem; color: var(--muted); }
.cr-field input, .cr-field textarea {
  width: 100%;
  border: 1px solid var(--panel-border);
  border-radius: 6px;
  padding: 0.5rem;
  font: inherit;
}
.cr-form-actions, .cr-modal-actions { display: flex; gap: 0.5rem; justify-content: flex-end; margin-top: 0.8rem; }
.cr-notice { margin-top: 0.8rem; padding: 0.6rem 0.8rem; border-radius: 6px; }
.cr-notice.error { background: #fef2f2; border: 1px solid #fecaca; color: var(--red-strong); }
.cr-muted { color: var(--muted); }
.cr-back { display: inline-block; margin-bottom: 0.6rem; color: var(--indigo); text-decoration: none; }
.cr-spinner { display: flex; gap: 0.5rem; align-items: center; margin-top: 1rem; }
.cr-spinner-dot {
  width: 1rem;
  height: 1rem;
  border-radius: 50%;
  border: 2px solid var(--indigo);
  border-right-color: transparent;
  animation: cr-spin 0.8s linear infinite;
}
@keyframes cr-spin { to { transform: rotate(360deg); } }
.cr-modal {
  position: fixed;
  inset: 0;
  display: flex;
  align-items: center;
  justify-content: center;
  background: rgba(15, 23, 42, 0.55);
  transition: opacity 150ms ease-out, visibility 150ms ease-out;
}
.cr-modal .cr-modal-body {
  background: var(--panel);
  border-radius: 10px;
  padding: 1.25rem;
  width: min(32rem, 92vw);
  transition: transform 150ms ease-out;
}
.cr-modal.shown { opacity: 1; visibility: visible; }
.cr-modal.shown .cr-modal-body { transform: translateY(0) scale(1); }
.cr-modal.hidden { opacity: 0; visibility: hidden; }
.cr-modal.hidden .cr-modal-body { transform: translateY(1rem) scale(0.95); }
"#
}
