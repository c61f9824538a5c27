// src/widget/view.rs
//
// Markup projection of a `ChatWidget`. Nothing here holds state.

use super::component::ChatWidget;
use super::escape::escape_html;
use super::transcript::Message;

pub const ROOT_CLASS: &str = "twb-chatbot";
pub const STYLE_ID: &str = "twb-chatbot-styles";
pub const PROMPT_TEXT: &str = "Задайте вопрос, и я постараюсь помочь.";
const INPUT_PLACEHOLDER: &str = "Введите вопрос...";

const STYLES: &str = r#"
.twb-toggle{position:fixed;right:24px;bottom:24px;width:56px;height:56px;border:none;border-radius:50%;background:#5b3cc4;color:#fff;font-size:24px;cursor:pointer;box-shadow:0 6px 18px rgba(0,0,0,.2)}
.twb-toggle[hidden],.twb-panel[hidden]{display:none}
.twb-panel{position:fixed;right:24px;bottom:24px;width:360px;max-height:520px;display:flex;flex-direction:column;background:#fff;border-radius:16px;box-shadow:0 12px 32px rgba(0,0,0,.18);font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;overflow:hidden}
.twb-header{display:flex;align-items:center;justify-content:space-between;padding:14px 16px;background:#5b3cc4;color:#fff;font-weight:600}
.twb-close{background:none;border:none;color:inherit;font-size:20px;cursor:pointer}
.twb-messages{flex:1;overflow-y:auto;padding:16px;display:flex;flex-direction:column;gap:8px}
.twb-bubble{max-width:80%;padding:10px 14px;border-radius:12px;font-size:14px;line-height:1.45;white-space:pre-wrap;word-wrap:break-word}
.twb-user{align-self:flex-end;background:#5b3cc4;color:#fff}
.twb-agent{align-self:flex-start;background:#f1eefb;color:#1d1d1f}
.twb-typing{align-self:flex-start;background:#f1eefb;color:#777;font-style:italic}
.twb-error{align-self:flex-start;background:#fdecec;color:#b3261e}
.twb-prompt{align-self:center;color:#888;font-size:13px}
.twb-form{display:flex;gap:8px;padding:12px;border-top:1px solid #eee}
.twb-form input{flex:1;padding:10px 12px;border:1px solid #ddd;border-radius:8px;font-size:14px}
.twb-form button{padding:10px 16px;border:none;border-radius:8px;background:#5b3cc4;color:#fff;cursor:pointer}
"#;

/// The shared stylesheet, keyed by [`STYLE_ID`] so it is injected once per page.
pub fn stylesheet() -> String {
    format!(r#"<style id="{STYLE_ID}">{STYLES}</style>"#)
}

pub fn render_bubble(message: &Message) -> String {
    format!(
        r#"<div class="twb-bubble twb-{}" data-message-id="{}">{}</div>"#,
        message.role,
        message.id.index(),
        escape_html(&message.text)
    )
}

/// Toggle button followed by the dialog panel.
pub fn render_widget(widget: &ChatWidget) -> String {
    let dialog = widget.dialog();
    let transcript = widget.transcript();

    let messages: String = if transcript.shows_prompt() {
        format!(r#"<div class="twb-prompt">{}</div>"#, escape_html(PROMPT_TEXT))
    } else {
        transcript.messages().iter().map(render_bubble).collect()
    };

    format!(
        concat!(
            r#"<button type="button" class="twb-toggle" aria-controls="twb-panel-{key}" aria-expanded="{expanded}" aria-label="Открыть чат"{toggle_hidden}>&#128172;</button>"#,
            r#"<div class="twb-panel" id="twb-panel-{key}" role="dialog" aria-label="{title}"{panel_hidden}>"#,
            r#"<div class="twb-header"><span>{title}</span>"#,
            r#"<button type="button" class="twb-close" aria-label="Закрыть чат">&times;</button></div>"#,
            r#"<div class="twb-messages" id="twb-messages-{key}" aria-live="polite">{messages}</div>"#,
            r#"<form class="twb-form" id="twb-form-{key}">"#,
            r#"<input class="twb-input" id="twb-input-{key}" type="text" autocomplete="off" placeholder="{placeholder}" value="{input}">"#,
            r#"<button type="submit">Отправить</button></form></div>"#,
        ),
        key = widget.key(),
        expanded = dialog.aria_expanded(),
        toggle_hidden = if dialog.toggle_hidden() { " hidden" } else { "" },
        panel_hidden = if dialog.panel_hidden() { " hidden" } else { "" },
        title = escape_html(&widget.config().title),
        messages = messages,
        placeholder = INPUT_PLACEHOLDER,
        input = escape_html(widget.input()),
    )
}

/// Full host page with one server-rendered widget and the browser runtime.
pub fn render_demo_page(widget: &ChatWidget) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n",
            "<title>{title}</title>\n{styles}\n</head>\n<body>\n",
            "<div class=\"{root}\" data-api-endpoint=\"{endpoint}\">{widget}</div>\n",
            "<script src=\"/widget/chatbot.js\"></script>\n</body>\n</html>\n",
        ),
        title = escape_html(&widget.config().title),
        styles = stylesheet(),
        root = ROOT_CLASS,
        endpoint = escape_html(&widget.config().endpoint),
        widget = render_widget(widget),
    )
}

/// Browser runtime. Attaches to every server-rendered `.twb-chatbot` root and
/// drives the same open/close and submit flow against `data-api-endpoint`.
pub const WIDGET_SCRIPT: &str = r#"(function () {
  var NO_ANSWER = 'Извините, ответ не получен.';
  var CONNECTION_ERROR = 'Произошла ошибка при получении ответа. Пожалуйста, попробуйте позже.';
  var TYPING = 'Думаю над ответом...';

  function activates(e) { return e.key === 'Enter' || e.key === ' '; }

  document.querySelectorAll('.twb-chatbot').forEach(function (root) {
    var endpoint = (root.dataset.apiEndpoint || '').trim();
    if (!endpoint) { console.error('twb-chatbot: data-api-endpoint is missing'); return; }
    var sessionId = root.dataset.requestSchema === 'session' && window.crypto && crypto.randomUUID ? crypto.randomUUID() : null;

    var toggle = root.querySelector('.twb-toggle');
    var panel = root.querySelector('.twb-panel');
    var closeBtn = root.querySelector('.twb-close');
    var list = root.querySelector('.twb-messages');
    var form = root.querySelector('.twb-form');
    var input = root.querySelector('.twb-input');

    function open() {
      panel.hidden = false; toggle.hidden = true;
      toggle.setAttribute('aria-expanded', 'true');
      setTimeout(function () { input.focus(); }, 200);
    }
    function close() {
      panel.hidden = true; toggle.hidden = false;
      toggle.setAttribute('aria-expanded', 'false');
      toggle.focus();
    }
    toggle.addEventListener('click', open);
    toggle.addEventListener('keydown', function (e) { if (activates(e)) { e.preventDefault(); open(); } });
    closeBtn.addEventListener('click', close);
    closeBtn.addEventListener('keydown', function (e) { if (activates(e)) { e.preventDefault(); close(); } });

    function append(role, text) {
      var prompt = list.querySelector('.twb-prompt');
      if (prompt) prompt.remove();
      var bubble = document.createElement('div');
      bubble.className = 'twb-bubble twb-' + role;
      bubble.textContent = text;
      list.appendChild(bubble);
      list.scrollTop = list.scrollHeight;
      return bubble;
    }
    function resolve(bubble, role, text) {
      if (!bubble) return append(role, text);
      bubble.className = 'twb-bubble twb-' + role;
      bubble.textContent = text;
      list.scrollTop = list.scrollHeight;
      return bubble;
    }

    form.addEventListener('submit', async function (event) {
      event.preventDefault();
      var question = input.value.trim();
      if (!question) return;
      append('user', question);
      input.value = '';
      var placeholder = append('typing', TYPING);
      var body = { question: question };
      if (sessionId) body.session_id = sessionId;
      try {
        var response = await fetch(endpoint, {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(body)
        });
        var data = await response.json().catch(function () { return null; });
        if (!response.ok) {
          var detail = data && data.detail ? (typeof data.detail === 'string' ? data.detail : JSON.stringify(data.detail)) : '';
          var message = 'Ошибка сервера: ' + response.status + (detail.trim() ? '. ' + detail : '');
          console.error(message);
          resolve(placeholder, 'error', message);
          return;
        }
        var answer = data && typeof data.answer === 'string' && data.answer ? data.answer : NO_ANSWER;
        resolve(placeholder, 'agent', answer);
      } catch (error) {
        console.error(error);
        resolve(placeholder, 'error', CONNECTION_ERROR);
      }
    });
  });
})();
"#;
