//! Styling, indicator, margin, annotation and character class messages.

use crate::annotations::SC_MAX_MARGIN;
use crate::char_class::CharClass;
use crate::decorations::INDIC_MAX;
use crate::engine::Engine;
use crate::idle::IdleStyling;
use crate::messages::Message;
use crate::param::{Param, Reply};
use crate::styles::{
    IndicatorStyle, SC_FONT_SIZE_MULTIPLIER, SC_WEIGHT_BOLD, SC_WEIGHT_NORMAL, STYLE_DEFAULT,
    STYLE_MAX, Style,
};

/// Which per-line text store a message addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineText {
    Margin,
    Annotation,
}

impl Engine {
    pub(crate) fn style_message(&mut self, message: Message, a: &Param, b: &Param) -> Option<Reply> {
        let reply = match message {
            Message::StartStyling => {
                let position = self.position(a);
                let mask = match b.as_int() {
                    0 => 0xFF,
                    mask => mask as u8,
                };
                self.doc_mut().start_styling(position, mask);
                Reply::Int(0)
            }
            Message::SetStyling => {
                let length = a.as_int().max(0) as usize;
                let style = self.style_id(b);
                self.doc_mut().set_styling(length, style);
                Reply::Int(0)
            }
            Message::SetStylingEx => {
                let mut styles = b.as_bytes();
                if a.as_int() >= 0 {
                    styles.truncate(a.as_int() as usize);
                }
                if let Some(&highest) = styles.iter().max() {
                    self.styles.ensure(highest as usize);
                }
                self.doc_mut().set_styling_ex(&styles);
                Reply::Int(0)
            }
            Message::GetStyleAt => {
                let position = a.as_int();
                let document = self.doc();
                if position < 0 || position as usize >= document.len() {
                    Reply::Int(0)
                } else {
                    document.style_at(position as usize).into()
                }
            }
            Message::GetEndStyled => self.doc().end_styled().into(),
            Message::Colourise => {
                let start = self.position(a);
                let end = if b.as_int() < 0 {
                    self.doc_len()
                } else {
                    self.position(b)
                };
                if start < end {
                    self.colourise_range(start, end);
                }
                Reply::Int(0)
            }
            Message::SetIdleStyling => {
                self.set_idle_styling(IdleStyling::from_code(a.as_int()));
                Reply::Int(0)
            }
            Message::GetIdleStyling => self.idle_styler.mode().code().into(),
            Message::SetLineState => match self.valid_line(a) {
                Some(line) => self.doc_mut().set_line_state(line, b.as_int() as i32).into(),
                None => Reply::Int(0),
            },
            Message::GetLineState => match self.valid_line(a) {
                Some(line) => self.doc().line_state(line).into(),
                None => Reply::Int(0),
            },
            Message::GetMaxLineState => self.doc().max_line_state().into(),
            Message::StyleClearAll => {
                self.styles.clear_all();
                self.damage_style_metrics();
                Reply::Int(0)
            }
            Message::StyleResetDefault => {
                self.styles.reset_default();
                self.damage_style_metrics();
                Reply::Int(0)
            }
            Message::SetWordChars => {
                let mut document = self.doc_mut();
                let classifier = document.classifier_mut();
                if b.is_none() {
                    classifier.set_defaults(true);
                } else {
                    classifier.set_defaults(false);
                    classifier.set_chars(&b.as_text(), CharClass::Word);
                }
                Reply::Int(0)
            }
            Message::GetWordChars => self.doc().classifier().chars_of(CharClass::Word).into(),
            Message::SetWhitespaceChars => {
                if !b.is_none() {
                    self.doc_mut()
                        .classifier_mut()
                        .set_chars(&b.as_text(), CharClass::Space);
                }
                Reply::Int(0)
            }
            Message::GetWhitespaceChars => {
                self.doc().classifier().chars_of(CharClass::Space).into()
            }
            Message::SetPunctuationChars => {
                if !b.is_none() {
                    self.doc_mut()
                        .classifier_mut()
                        .set_chars(&b.as_text(), CharClass::Punctuation);
                }
                Reply::Int(0)
            }
            Message::GetPunctuationChars => self
                .doc()
                .classifier()
                .chars_of(CharClass::Punctuation)
                .into(),
            Message::SetCharsDefault => {
                self.doc_mut().classifier_mut().set_defaults(true);
                Reply::Int(0)
            }
            _ => {
                return self
                    .style_attribute_message(message, a, b)
                    .or_else(|| self.indicator_message(message, a, b))
                    .or_else(|| self.margin_message(message, a, b));
            }
        };
        Some(reply)
    }

    /// `STYLESET*` and `STYLEGET*`.
    fn style_attribute_message(&mut self, message: Message, a: &Param, b: &Param) -> Option<Reply> {
        let set = |engine: &mut Engine, apply: &dyn Fn(&mut Style)| {
            let Ok(index) = usize::try_from(a.as_int()) else {
                return Reply::Int(0);
            };
            if let Some(style) = engine.styles.get_mut(index) {
                apply(style);
                engine.damage_style_metrics();
            }
            Reply::Int(0)
        };
        let flag = b.as_int() != 0;
        let value = b.as_int();
        let reply = match message {
            Message::StyleSetFore => set(self, &|s| s.fore = value as u32),
            Message::StyleSetBack => set(self, &|s| s.back = value as u32),
            Message::StyleSetBold => set(self, &|s| {
                s.weight = if flag { SC_WEIGHT_BOLD } else { SC_WEIGHT_NORMAL }
            }),
            Message::StyleSetWeight => set(self, &|s| s.weight = value as i32),
            Message::StyleSetItalic => set(self, &|s| s.italic = flag),
            Message::StyleSetSize => {
                set(self, &|s| s.size = value as i32 * SC_FONT_SIZE_MULTIPLIER)
            }
            Message::StyleSetFont => {
                let font = b.as_text();
                set(self, &|s| s.font = font.clone())
            }
            Message::StyleSetEolFilled => set(self, &|s| s.eol_filled = flag),
            Message::StyleSetUnderline => set(self, &|s| s.underline = flag),
            Message::StyleSetCase => set(self, &|s| s.case_force = value as i32),
            Message::StyleSetCharacterSet => set(self, &|s| s.character_set = value as i32),
            Message::StyleSetVisible => set(self, &|s| s.visible = flag),
            Message::StyleSetChangeable => set(self, &|s| s.changeable = flag),
            Message::StyleSetHotspot => set(self, &|s| s.hotspot = flag),
            Message::StyleGetFore => self.style_value(a, |s| s.fore.into()),
            Message::StyleGetBack => self.style_value(a, |s| s.back.into()),
            Message::StyleGetBold => self.style_value(a, |s| (s.weight > SC_WEIGHT_NORMAL).into()),
            Message::StyleGetWeight => self.style_value(a, |s| s.weight.into()),
            Message::StyleGetItalic => self.style_value(a, |s| s.italic.into()),
            Message::StyleGetSize => {
                self.style_value(a, |s| (s.size / SC_FONT_SIZE_MULTIPLIER).into())
            }
            Message::StyleGetFont => self.style_value(a, |s| s.font.clone().into()),
            Message::StyleGetEolFilled => self.style_value(a, |s| s.eol_filled.into()),
            Message::StyleGetUnderline => self.style_value(a, |s| s.underline.into()),
            Message::StyleGetCase => self.style_value(a, |s| s.case_force.into()),
            Message::StyleGetCharacterSet => self.style_value(a, |s| s.character_set.into()),
            Message::StyleGetVisible => self.style_value(a, |s| s.visible.into()),
            Message::StyleGetChangeable => self.style_value(a, |s| s.changeable.into()),
            Message::StyleGetHotspot => self.style_value(a, |s| s.hotspot.into()),
            _ => return None,
        };
        Some(reply)
    }

    /// Read an attribute; styles not yet allocated read as the default style.
    fn style_value(&self, index: &Param, get: impl Fn(&Style) -> Reply) -> Reply {
        match usize::try_from(index.as_int()) {
            Ok(index) if index <= STYLE_MAX => self
                .styles
                .get(index)
                .or_else(|| self.styles.get(STYLE_DEFAULT))
                .map(get)
                .unwrap_or_default(),
            _ => Reply::Int(0),
        }
    }

    /// Returns `true` if text in `style` is a hotspot.
    pub(crate) fn is_hotspot_style(&self, style: u8) -> bool {
        self.styles
            .get(style as usize)
            .is_some_and(|s| s.hotspot)
    }

    fn indicator_message(&mut self, message: Message, a: &Param, b: &Param) -> Option<Reply> {
        let indicator = usize::try_from(a.as_int())
            .ok()
            .filter(|index| *index <= INDIC_MAX);
        let set = |engine: &mut Engine, apply: &dyn Fn(&mut IndicatorStyle)| {
            if let Some(index) = indicator {
                apply(&mut engine.indicators[index]);
                engine.damage_all();
            }
            Reply::Int(0)
        };
        let get = |engine: &Engine, read: &dyn Fn(&IndicatorStyle) -> isize| {
            indicator
                .map(|index| read(&engine.indicators[index]))
                .unwrap_or(0)
                .into()
        };
        let value = b.as_int();
        let reply: Reply = match message {
            Message::IndicSetStyle => set(self, &|i| i.style = value as i32),
            Message::IndicSetFore => set(self, &|i| i.fore = value as u32),
            Message::IndicSetUnder => set(self, &|i| i.under = value != 0),
            Message::IndicSetAlpha => set(self, &|i| i.alpha = value.clamp(0, 255) as i32),
            Message::IndicSetOutlineAlpha => {
                set(self, &|i| i.outline_alpha = value.clamp(0, 255) as i32)
            }
            Message::IndicGetStyle => get(self, &|i| i.style as isize),
            Message::IndicGetFore => get(self, &|i| i.fore as isize),
            Message::IndicGetUnder => get(self, &|i| i.under as isize),
            Message::IndicGetAlpha => get(self, &|i| i.alpha as isize),
            Message::IndicGetOutlineAlpha => get(self, &|i| i.outline_alpha as isize),
            Message::SetIndicatorCurrent => {
                if let Some(index) = indicator {
                    self.doc_mut().set_indicator_current(index);
                }
                Reply::Int(0)
            }
            Message::GetIndicatorCurrent => self.doc().decorations().current.into(),
            Message::SetIndicatorValue => {
                self.doc_mut().set_indicator_value(a.as_int() as i32);
                Reply::Int(0)
            }
            Message::GetIndicatorValue => self.doc().decorations().current_value.into(),
            Message::IndicatorFillRange | Message::IndicatorClearRange => {
                let start = self.position(a);
                let length = b.as_int();
                if length > 0 {
                    let mut document = self.doc_mut();
                    if message == Message::IndicatorFillRange {
                        document.indicator_fill(start, length as usize);
                    } else {
                        document.indicator_clear(start, length as usize);
                    }
                }
                Reply::Int(0)
            }
            Message::IndicatorAllOnFor => {
                let position = self.position(a);
                self.doc().decorations().all_on_for(position).into()
            }
            Message::IndicatorValueAt => match indicator {
                Some(index) => {
                    let position = self.position(b);
                    self.doc().decorations().value_at(index, position).into()
                }
                None => Reply::Int(0),
            },
            Message::IndicatorStart => match indicator {
                Some(index) => {
                    let position = self.position(b);
                    self.doc().decorations().start(index, position).into()
                }
                None => Reply::Int(0),
            },
            Message::IndicatorEnd => match indicator {
                Some(index) => {
                    let position = self.position(b);
                    self.doc().decorations().end(index, position).into()
                }
                None => Reply::Int(0),
            },
            _ => return None,
        };
        Some(reply)
    }

    fn margin_message(&mut self, message: Message, a: &Param, b: &Param) -> Option<Reply> {
        let margin = usize::try_from(a.as_int())
            .ok()
            .filter(|index| *index <= SC_MAX_MARGIN);
        let value = b.as_int();
        let reply = match message {
            Message::SetMarginTypeN
            | Message::SetMarginWidthN
            | Message::SetMarginMaskN
            | Message::SetMarginSensitiveN => {
                if let Some(index) = margin {
                    let def = &mut self.margins[index];
                    match message {
                        Message::SetMarginTypeN => def.kind = value as i32,
                        Message::SetMarginWidthN => def.width = value.max(0) as i32,
                        Message::SetMarginMaskN => def.mask = value as u32,
                        _ => def.sensitive = value != 0,
                    }
                    self.damage_all();
                }
                Reply::Int(0)
            }
            Message::GetMarginTypeN => margin.map(|m| self.margins[m].kind).unwrap_or(0).into(),
            Message::GetMarginWidthN => margin.map(|m| self.margins[m].width).unwrap_or(0).into(),
            Message::GetMarginMaskN => margin.map(|m| self.margins[m].mask).unwrap_or(0).into(),
            Message::GetMarginSensitiveN => margin
                .map(|m| self.margins[m].sensitive)
                .unwrap_or(false)
                .into(),
            Message::MarginSetText => self.set_line_text(LineText::Margin, a, b),
            Message::AnnotationSetText => self.set_line_text(LineText::Annotation, a, b),
            Message::MarginGetText => self.line_text(LineText::Margin, a),
            Message::AnnotationGetText => self.line_text(LineText::Annotation, a),
            Message::MarginSetStyle | Message::AnnotationSetStyle => {
                if let Some(line) = self.valid_line(a) {
                    let style = self.style_id(b);
                    let mut document = self.doc_mut();
                    if message == Message::MarginSetStyle {
                        document.set_margin_style(line, style);
                    } else {
                        document.set_annotation_style(line, style);
                    }
                }
                Reply::Int(0)
            }
            Message::MarginGetStyle => self.line_store(LineText::Margin, a, |s, l| s.style(l).into()),
            Message::AnnotationGetStyle => {
                self.line_store(LineText::Annotation, a, |s, l| s.style(l).into())
            }
            Message::MarginSetStyles | Message::AnnotationSetStyles => {
                if let Some(line) = self.valid_line(a) {
                    let styles = b.as_bytes();
                    let mut document = self.doc_mut();
                    if message == Message::MarginSetStyles {
                        document.set_margin_styles(line, &styles);
                    } else {
                        document.set_annotation_styles(line, &styles);
                    }
                }
                Reply::Int(0)
            }
            Message::MarginGetStyles => {
                self.line_store(LineText::Margin, a, |s, l| Reply::Bytes(s.styles(l)))
            }
            Message::AnnotationGetStyles => {
                self.line_store(LineText::Annotation, a, |s, l| Reply::Bytes(s.styles(l)))
            }
            Message::AnnotationGetLines => {
                self.line_store(LineText::Annotation, a, |s, l| s.line_count(l).into())
            }
            Message::MarginTextClearAll => {
                self.doc_mut().clear_margin_text();
                Reply::Int(0)
            }
            Message::AnnotationClearAll => {
                self.doc_mut().clear_annotations();
                Reply::Int(0)
            }
            Message::MarginSetStyleOffset => {
                self.margin_style_offset = a.as_int().max(0);
                self.damage_all();
                Reply::Int(0)
            }
            Message::MarginGetStyleOffset => self.margin_style_offset.into(),
            Message::AnnotationSetStyleOffset => {
                self.annotation_style_offset = a.as_int().max(0);
                self.damage_all();
                Reply::Int(0)
            }
            Message::AnnotationGetStyleOffset => self.annotation_style_offset.into(),
            Message::AnnotationSetVisible => {
                self.annotation_visible = a.as_int();
                self.damage_all();
                Reply::Int(0)
            }
            Message::AnnotationGetVisible => self.annotation_visible.into(),
            _ => return None,
        };
        Some(reply)
    }

    /// Absent text clears the line; any text, even empty, is stored.
    fn set_line_text(&mut self, store: LineText, line: &Param, text: &Param) -> Reply {
        if let Some(line) = self.valid_line(line) {
            let text = (!text.is_none()).then(|| text.as_text());
            let mut document = self.doc_mut();
            match store {
                LineText::Margin => document.set_margin_text(line, text.as_deref()),
                LineText::Annotation => document.set_annotation_text(line, text.as_deref()),
            }
        }
        Reply::Int(0)
    }

    fn line_text(&self, store: LineText, line: &Param) -> Reply {
        self.line_store(store, line, |s, l| s.text(l).into())
    }

    /// A style id argument, growing the style table to hold it.
    ///
    /// Ids are stored as bytes; anything outside `0..=STYLE_MAX` is pinned to the nearest end.
    fn style_id(&mut self, param: &Param) -> u8 {
        let requested = param.as_int();
        let id = requested.clamp(0, STYLE_MAX as isize) as usize;
        if id as isize != requested {
            tracing::warn!(target: "engine.dispatch", requested, used = id, "style id out of range");
        }
        self.styles.ensure(id);
        id as u8
    }

    fn line_store(
        &self,
        store: LineText,
        line: &Param,
        read: impl Fn(&crate::annotations::LineAnnotations, usize) -> Reply,
    ) -> Reply {
        let Some(line) = self.valid_line(line) else {
            return Reply::Int(0);
        };
        let document = self.doc();
        match store {
            LineText::Margin => read(document.margins(), line),
            LineText::Annotation => read(document.annotations(), line),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Engine;
    use crate::messages::*;
    use crate::param::Reply;

    #[test]
    fn test_style_size_and_bold() {
        let mut engine = Engine::new();
        engine.dispatch(SCI_STYLESETSIZE, 5, 12);
        engine.dispatch(SCI_STYLESETBOLD, 5, 1);
        assert_eq!(engine.dispatch(SCI_STYLEGETSIZE, 5, 0).as_int(), 12);
        assert_eq!(engine.dispatch(SCI_STYLEGETBOLD, 5, 0).as_int(), 1);
        assert_eq!(engine.dispatch(SCI_STYLEGETWEIGHT, 5, 0).as_int(), 700);
        assert_eq!(engine.dispatch(SCI_STYLEGETBOLD, 300, 0).as_int(), 0);
    }

    #[test]
    fn test_style_table_grows_on_demand() {
        let mut engine = Engine::new();
        engine.dispatch(SCI_STYLESETFONT, 200, "Fira Code");
        assert_eq!(
            engine.dispatch(SCI_STYLEGETFONT, 200, 0),
            Reply::Text("Fira Code".to_string())
        );
        assert_eq!(engine.style_table().len(), 201);
    }

    #[test]
    fn test_large_style_ids_do_not_wrap() {
        let mut engine = Engine::new();
        engine.dispatch(SCI_SETTEXT, 0, "abcd");
        engine.dispatch(SCI_STARTSTYLING, 0, 0);
        engine.dispatch(SCI_SETSTYLING, 2, 300);
        engine.dispatch(SCI_SETSTYLING, 2, 70);
        assert_eq!(engine.dispatch(SCI_GETSTYLEAT, 0, 0).as_int(), 255);
        assert_eq!(engine.dispatch(SCI_GETSTYLEAT, 2, 0).as_int(), 70);
        assert_eq!(engine.style_table().len(), 256);

        engine.dispatch(SCI_MARGINSETSTYLE, 0, 999);
        assert_eq!(engine.dispatch(SCI_MARGINGETSTYLE, 0, 0).as_int(), 255);
    }

    #[test]
    fn test_margin_index_out_of_range_ignored() {
        let mut engine = Engine::new();
        engine.dispatch(SCI_SETMARGINWIDTHN, 7, 20);
        assert_eq!(engine.dispatch(SCI_GETMARGINWIDTHN, 7, 0).as_int(), 0);
        engine.dispatch(SCI_SETMARGINWIDTHN, 3, 20);
        assert_eq!(engine.dispatch(SCI_GETMARGINWIDTHN, 3, 0).as_int(), 20);
    }

    #[test]
    fn test_word_chars_reset() {
        let mut engine = Engine::new();
        engine.dispatch(SCI_SETTEXT, 0, "foo-bar baz");
        engine.dispatch(SCI_SETWORDCHARS, 0, "abcdefghijklmnopqrstuvwxyz-");
        assert_eq!(engine.dispatch(SCI_WORDENDPOSITION, 0, 1).as_int(), 7);
        engine.dispatch(SCI_SETWORDCHARS, 0, ());
        assert_eq!(engine.dispatch(SCI_WORDENDPOSITION, 0, 1).as_int(), 3);
    }
}
