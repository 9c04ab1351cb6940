//! Message codes.
//!
//! Every operation of the engine is addressed by a numeric code. [`Message`] is the typed
//! view of those codes: the dispatcher decodes the raw code once at the boundary and matches
//! on the enum from then on. The `SCI_*` constants are kept for hosts that speak raw codes.

/// Invalid position or line result.
pub const INVALID_POSITION: isize = -1;

/// No error.
pub const SC_STATUS_OK: isize = 0;
/// A regular expression failed to compile.
pub const SC_STATUS_WARN_REGEX: isize = 1001;

/// Edits in hidden lines expand their folds.
pub const SC_AUTOMATICFOLD_SHOW: isize = 0x1;
/// Clicks in a fold margin toggle folds.
pub const SC_AUTOMATICFOLD_CLICK: isize = 0x2;
/// Fold level changes update contraction.
pub const SC_AUTOMATICFOLD_CHANGE: isize = 0x4;

macro_rules! messages {
    ($( $(#[$doc:meta])* $variant:ident = $code:literal, $name:ident; )*) => {
        $(
            $(#[$doc])*
            pub const $name: u32 = $code;
        )*

        /// A decoded message code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Message {
            $(
                $(#[$doc])*
                $variant,
            )*
        }

        impl Message {
            /// Decode a raw code; unknown codes yield `None`.
            pub fn from_code(code: u32) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$variant), )*
                    _ => None,
                }
            }

            /// Raw code.
            pub fn code(self) -> u32 {
                match self {
                    $( Self::$variant => $code, )*
                }
            }

            /// `SCI_*` name.
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($name), )*
                }
            }
        }

        /// Every known message as `(code, name)`, ordered by code.
        pub const CATALOGUE: &[(u32, &str)] = &[
            $( ($code, stringify!($name)), )*
        ];
    };
}

messages! {
    /// Insert text at the caret and move the caret after it.
    AddText = 2001, SCI_ADDTEXT;
    /// Insert character/style byte pairs at the caret.
    AddStyledText = 2002, SCI_ADDSTYLEDTEXT;
    /// Insert text at a position (-1 for the caret).
    InsertText = 2003, SCI_INSERTTEXT;
    /// Delete all text.
    ClearAll = 2004, SCI_CLEARALL;
    /// Reset all styles and fold levels.
    ClearDocumentStyle = 2005, SCI_CLEARDOCUMENTSTYLE;
    /// Document length.
    GetLength = 2006, SCI_GETLENGTH;
    /// Character at a position.
    GetCharAt = 2007, SCI_GETCHARAT;
    /// Caret of the main selection.
    GetCurrentPos = 2008, SCI_GETCURRENTPOS;
    /// Anchor of the main selection.
    GetAnchor = 2009, SCI_GETANCHOR;
    /// Style at a position.
    GetStyleAt = 2010, SCI_GETSTYLEAT;
    /// Redo the last undone group.
    Redo = 2011, SCI_REDO;
    /// Turn undo recording on or off.
    SetUndoCollection = 2012, SCI_SETUNDOCOLLECTION;
    /// Select the whole document.
    SelectAll = 2013, SCI_SELECTALL;
    /// Mark the document as saved.
    SetSavePoint = 2014, SCI_SETSAVEPOINT;
    /// Character/style byte pairs of a range.
    GetStyledText = 2015, SCI_GETSTYLEDTEXT;
    /// Whether redo is possible.
    CanRedo = 2016, SCI_CANREDO;
    /// Whether undo is recorded.
    GetUndoCollection = 2019, SCI_GETUNDOCOLLECTION;
    /// Move the caret to the start of a line.
    GotoLine = 2024, SCI_GOTOLINE;
    /// Move the caret to a position.
    GotoPos = 2025, SCI_GOTOPOS;
    /// Set the anchor of the main selection.
    SetAnchor = 2026, SCI_SETANCHOR;
    /// Text of the caret line.
    GetCurLine = 2027, SCI_GETCURLINE;
    /// Position up to which styling is current.
    GetEndStyled = 2028, SCI_GETENDSTYLED;
    /// Rewrite every line ending.
    ConvertEols = 2029, SCI_CONVERTEOLS;
    /// Line ending for new lines.
    GetEolMode = 2030, SCI_GETEOLMODE;
    /// Set the line ending for new lines.
    SetEolMode = 2031, SCI_SETEOLMODE;
    /// Begin styling at a position.
    StartStyling = 2032, SCI_STARTSTYLING;
    /// Style the next characters.
    SetStyling = 2033, SCI_SETSTYLING;
    /// Set the tab width.
    SetTabWidth = 2036, SCI_SETTABWIDTH;
    /// Copy the default style to every style.
    StyleClearAll = 2050, SCI_STYLECLEARALL;
    /// Set a style's foreground colour.
    StyleSetFore = 2051, SCI_STYLESETFORE;
    /// Set a style's background colour.
    StyleSetBack = 2052, SCI_STYLESETBACK;
    /// Set a style's bold flag.
    StyleSetBold = 2053, SCI_STYLESETBOLD;
    /// Set a style's italic flag.
    StyleSetItalic = 2054, SCI_STYLESETITALIC;
    /// Set a style's font size in points.
    StyleSetSize = 2055, SCI_STYLESETSIZE;
    /// Set a style's font name.
    StyleSetFont = 2056, SCI_STYLESETFONT;
    /// Set a style's end-of-line fill.
    StyleSetEolFilled = 2057, SCI_STYLESETEOLFILLED;
    /// Reset the default style.
    StyleResetDefault = 2058, SCI_STYLERESETDEFAULT;
    /// Set a style's underline flag.
    StyleSetUnderline = 2059, SCI_STYLESETUNDERLINE;
    /// Set a style's forced case.
    StyleSetCase = 2060, SCI_STYLESETCASE;
    /// Set a style's font weight.
    StyleSetWeight = 2063, SCI_STYLESETWEIGHT;
    /// A style's font weight.
    StyleGetWeight = 2064, SCI_STYLEGETWEIGHT;
    /// Set a style's character set.
    StyleSetCharacterSet = 2066, SCI_STYLESETCHARACTERSET;
    /// Style the next characters from a byte array.
    SetStylingEx = 2073, SCI_SETSTYLINGEX;
    /// Set a style's visibility.
    StyleSetVisible = 2074, SCI_STYLESETVISIBLE;
    /// Caret blink period.
    GetCaretPeriod = 2075, SCI_GETCARETPERIOD;
    /// Set the caret blink period.
    SetCaretPeriod = 2076, SCI_SETCARETPERIOD;
    /// Set the word characters.
    SetWordChars = 2077, SCI_SETWORDCHARS;
    /// Open an undo group.
    BeginUndoAction = 2078, SCI_BEGINUNDOACTION;
    /// Close an undo group.
    EndUndoAction = 2079, SCI_ENDUNDOACTION;
    /// Set an indicator's drawing style.
    IndicSetStyle = 2080, SCI_INDICSETSTYLE;
    /// An indicator's drawing style.
    IndicGetStyle = 2081, SCI_INDICGETSTYLE;
    /// Set an indicator's colour.
    IndicSetFore = 2082, SCI_INDICSETFORE;
    /// An indicator's colour.
    IndicGetFore = 2083, SCI_INDICGETFORE;
    /// Set a line's state integer.
    SetLineState = 2092, SCI_SETLINESTATE;
    /// A line's state integer.
    GetLineState = 2093, SCI_GETLINESTATE;
    /// Number of lines with state.
    GetMaxLineState = 2094, SCI_GETMAXLINESTATE;
    /// Set whether a style's text is editable.
    StyleSetChangeable = 2099, SCI_STYLESETCHANGEABLE;
    /// Tab width.
    GetTabWidth = 2121, SCI_GETTABWIDTH;
    /// Display column of a position.
    GetColumn = 2129, SCI_GETCOLUMN;
    /// Position before a line's terminator.
    GetLineEndPosition = 2136, SCI_GETLINEENDPOSITION;
    /// Whether edits are refused.
    GetReadOnly = 2140, SCI_GETREADONLY;
    /// Set the caret of the main selection.
    SetCurrentPos = 2141, SCI_SETCURRENTPOS;
    /// Set the start of the main selection.
    SetSelectionStart = 2142, SCI_SETSELECTIONSTART;
    /// Start of the main selection.
    GetSelectionStart = 2143, SCI_GETSELECTIONSTART;
    /// Set the end of the main selection.
    SetSelectionEnd = 2144, SCI_SETSELECTIONEND;
    /// End of the main selection.
    GetSelectionEnd = 2145, SCI_GETSELECTIONEND;
    /// Text of a line with its terminator.
    GetLine = 2153, SCI_GETLINE;
    /// Number of lines.
    GetLineCount = 2154, SCI_GETLINECOUNT;
    /// Whether the document differs from its save point.
    GetModify = 2159, SCI_GETMODIFY;
    /// Select a range.
    SetSel = 2160, SCI_SETSEL;
    /// Text of the selection.
    GetSelText = 2161, SCI_GETSELTEXT;
    /// Text of a range.
    GetTextRange = 2162, SCI_GETTEXTRANGE;
    /// Line containing a position.
    LineFromPosition = 2166, SCI_LINEFROMPOSITION;
    /// Start of a line.
    PositionFromLine = 2167, SCI_POSITIONFROMLINE;
    /// Replace the selection with text.
    ReplaceSel = 2170, SCI_REPLACESEL;
    /// Refuse or allow edits.
    SetReadOnly = 2171, SCI_SETREADONLY;
    /// Whether undo is possible.
    CanUndo = 2174, SCI_CANUNDO;
    /// Forget the undo history.
    EmptyUndoBuffer = 2175, SCI_EMPTYUNDOBUFFER;
    /// Undo the last group.
    Undo = 2176, SCI_UNDO;
    /// Delete the selection or the character after the caret.
    Clear = 2180, SCI_CLEAR;
    /// Replace all text.
    SetText = 2181, SCI_SETTEXT;
    /// All text.
    GetText = 2182, SCI_GETTEXT;
    /// Document length.
    GetTextLength = 2183, SCI_GETTEXTLENGTH;
    /// Set the target start.
    SetTargetStart = 2190, SCI_SETTARGETSTART;
    /// Target start.
    GetTargetStart = 2191, SCI_GETTARGETSTART;
    /// Set the target end.
    SetTargetEnd = 2192, SCI_SETTARGETEND;
    /// Target end.
    GetTargetEnd = 2193, SCI_GETTARGETEND;
    /// Replace the target with text.
    ReplaceTarget = 2194, SCI_REPLACETARGET;
    /// Replace the target expanding group references.
    ReplaceTargetRe = 2195, SCI_REPLACETARGETRE;
    /// Search the target.
    SearchInTarget = 2197, SCI_SEARCHINTARGET;
    /// Set target search flags.
    SetSearchFlags = 2198, SCI_SETSEARCHFLAGS;
    /// Target search flags.
    GetSearchFlags = 2199, SCI_GETSEARCHFLAGS;
    /// Display line of a document line.
    VisibleFromDocLine = 2220, SCI_VISIBLEFROMDOCLINE;
    /// Document line of a display line.
    DocLineFromVisible = 2221, SCI_DOCLINEFROMVISIBLE;
    /// Set a line's fold level.
    SetFoldLevel = 2222, SCI_SETFOLDLEVEL;
    /// A line's fold level.
    GetFoldLevel = 2223, SCI_GETFOLDLEVEL;
    /// Last line of a fold.
    GetLastChild = 2224, SCI_GETLASTCHILD;
    /// Header enclosing a line.
    GetFoldParent = 2225, SCI_GETFOLDPARENT;
    /// Show a line range.
    ShowLines = 2226, SCI_SHOWLINES;
    /// Hide a line range.
    HideLines = 2227, SCI_HIDELINES;
    /// Whether a line is shown.
    GetLineVisible = 2228, SCI_GETLINEVISIBLE;
    /// Set a header's expanded flag.
    SetFoldExpanded = 2229, SCI_SETFOLDEXPANDED;
    /// A header's expanded flag.
    GetFoldExpanded = 2230, SCI_GETFOLDEXPANDED;
    /// Toggle a fold.
    ToggleFold = 2231, SCI_TOGGLEFOLD;
    /// Expand folds hiding a line.
    EnsureVisible = 2232, SCI_ENSUREVISIBLE;
    /// Set fold line drawing flags.
    SetFoldFlags = 2233, SCI_SETFOLDFLAGS;
    /// Expand folds hiding a line and scroll to it.
    EnsureVisibleEnforcePolicy = 2234, SCI_ENSUREVISIBLEENFORCEPOLICY;
    /// Display lines of a document line.
    WrapCount = 2235, SCI_WRAPCOUNT;
    /// Whether no line is hidden.
    GetAllLinesVisible = 2236, SCI_GETALLLINESVISIBLE;
    /// Contract, expand or toggle a fold.
    FoldLine = 2237, SCI_FOLDLINE;
    /// Apply a fold action to a header and its descendants.
    FoldChildren = 2238, SCI_FOLDCHILDREN;
    /// Expand the children of a header.
    ExpandChildren = 2239, SCI_EXPANDCHILDREN;
    /// Set a margin's type.
    SetMarginTypeN = 2240, SCI_SETMARGINTYPEN;
    /// A margin's type.
    GetMarginTypeN = 2241, SCI_GETMARGINTYPEN;
    /// Set a margin's width.
    SetMarginWidthN = 2242, SCI_SETMARGINWIDTHN;
    /// A margin's width.
    GetMarginWidthN = 2243, SCI_GETMARGINWIDTHN;
    /// Set a margin's marker mask.
    SetMarginMaskN = 2244, SCI_SETMARGINMASKN;
    /// A margin's marker mask.
    GetMarginMaskN = 2245, SCI_GETMARGINMASKN;
    /// Set whether a margin reports clicks.
    SetMarginSensitiveN = 2246, SCI_SETMARGINSENSITIVEN;
    /// Whether a margin reports clicks.
    GetMarginSensitiveN = 2247, SCI_GETMARGINSENSITIVEN;
    /// Set the dwell delay.
    SetMouseDwellTime = 2264, SCI_SETMOUSEDWELLTIME;
    /// Dwell delay.
    GetMouseDwellTime = 2265, SCI_GETMOUSEDWELLTIME;
    /// Start of the word at a position.
    WordStartPosition = 2266, SCI_WORDSTARTPOSITION;
    /// End of the word at a position.
    WordEndPosition = 2267, SCI_WORDENDPOSITION;
    /// Append text at the end.
    AppendText = 2282, SCI_APPENDTEXT;
    /// Set the target to the main selection.
    TargetFromSelection = 2287, SCI_TARGETFROMSELECTION;
    /// Delete the selection or the character before the caret.
    DeleteBack = 2326, SCI_DELETEBACK;
    /// Insert a line ending at the caret.
    NewLine = 2329, SCI_NEWLINE;
    /// Length of a line with its terminator.
    LineLength = 2350, SCI_LINELENGTH;
    /// Current document.
    GetDocPointer = 2357, SCI_GETDOCPOINTER;
    /// Switch to another document.
    SetDocPointer = 2358, SCI_SETDOCPOINTER;
    /// Set which modifications are reported.
    SetModEventMask = 2359, SCI_SETMODEVENTMASK;
    /// Anchor the next search at the selection start.
    SearchAnchor = 2366, SCI_SEARCHANCHOR;
    /// Search forward from the search anchor.
    SearchNext = 2367, SCI_SEARCHNEXT;
    /// Search backward from the search anchor.
    SearchPrev = 2368, SCI_SEARCHPREV;
    /// Whether the selection is rectangular.
    SelectionIsRectangle = 2372, SCI_SELECTIONISRECTANGLE;
    /// Set the zoom level.
    SetZoom = 2373, SCI_SETZOOM;
    /// Zoom level.
    GetZoom = 2374, SCI_GETZOOM;
    /// Create a detached document.
    CreateDocument = 2375, SCI_CREATEDOCUMENT;
    /// Take a reference to a document.
    AddRefDocument = 2376, SCI_ADDREFDOCUMENT;
    /// Release a reference to a document.
    ReleaseDocument = 2377, SCI_RELEASEDOCUMENT;
    /// Which modifications are reported.
    GetModEventMask = 2378, SCI_GETMODEVENTMASK;
    /// Set the focus flag.
    SetFocus = 2380, SCI_SETFOCUS;
    /// Focus flag.
    GetFocus = 2381, SCI_GETFOCUS;
    /// Set the error status.
    SetStatus = 2382, SCI_SETSTATUS;
    /// Error status.
    GetStatus = 2383, SCI_GETSTATUS;
    /// Set a style's hotspot flag.
    StyleSetHotspot = 2409, SCI_STYLESETHOTSPOT;
    /// Start of the grapheme before a position.
    PositionBefore = 2417, SCI_POSITIONBEFORE;
    /// End of the grapheme after a position.
    PositionAfter = 2418, SCI_POSITIONAFTER;
    /// Set the selection mode.
    SetSelectionMode = 2422, SCI_SETSELECTIONMODE;
    /// Selection mode.
    GetSelectionMode = 2423, SCI_GETSELECTIONMODE;
    /// Start of the selection on a line.
    GetLineSelStartPosition = 2424, SCI_GETLINESELSTARTPOSITION;
    /// End of the selection on a line.
    GetLineSelEndPosition = 2425, SCI_GETLINESELENDPOSITION;
    /// Set the whitespace characters.
    SetWhitespaceChars = 2443, SCI_SETWHITESPACECHARS;
    /// Reset character classes.
    SetCharsDefault = 2444, SCI_SETCHARSDEFAULT;
    /// Position of a display column on a line.
    FindColumn = 2456, SCI_FINDCOLUMN;
    /// A style's foreground colour.
    StyleGetFore = 2481, SCI_STYLEGETFORE;
    /// A style's background colour.
    StyleGetBack = 2482, SCI_STYLEGETBACK;
    /// A style's bold flag.
    StyleGetBold = 2483, SCI_STYLEGETBOLD;
    /// A style's italic flag.
    StyleGetItalic = 2484, SCI_STYLEGETITALIC;
    /// A style's font size in points.
    StyleGetSize = 2485, SCI_STYLEGETSIZE;
    /// A style's font name.
    StyleGetFont = 2486, SCI_STYLEGETFONT;
    /// A style's end-of-line fill.
    StyleGetEolFilled = 2487, SCI_STYLEGETEOLFILLED;
    /// A style's underline flag.
    StyleGetUnderline = 2488, SCI_STYLEGETUNDERLINE;
    /// A style's forced case.
    StyleGetCase = 2489, SCI_STYLEGETCASE;
    /// A style's character set.
    StyleGetCharacterSet = 2490, SCI_STYLEGETCHARACTERSET;
    /// A style's visibility.
    StyleGetVisible = 2491, SCI_STYLEGETVISIBLE;
    /// Whether a style's text is editable.
    StyleGetChangeable = 2492, SCI_STYLEGETCHANGEABLE;
    /// A style's hotspot flag.
    StyleGetHotspot = 2493, SCI_STYLEGETHOTSPOT;
    /// Select the indicator to fill and clear.
    SetIndicatorCurrent = 2500, SCI_SETINDICATORCURRENT;
    /// Indicator filled and cleared.
    GetIndicatorCurrent = 2501, SCI_GETINDICATORCURRENT;
    /// Set the value fills write.
    SetIndicatorValue = 2502, SCI_SETINDICATORVALUE;
    /// Value fills write.
    GetIndicatorValue = 2503, SCI_GETINDICATORVALUE;
    /// Fill a range of the current indicator.
    IndicatorFillRange = 2504, SCI_INDICATORFILLRANGE;
    /// Clear a range of the current indicator.
    IndicatorClearRange = 2505, SCI_INDICATORCLEARRANGE;
    /// Bitmask of indicators set at a position.
    IndicatorAllOnFor = 2506, SCI_INDICATORALLONFOR;
    /// Value of an indicator at a position.
    IndicatorValueAt = 2507, SCI_INDICATORVALUEAT;
    /// Start of an indicator run.
    IndicatorStart = 2508, SCI_INDICATORSTART;
    /// End of an indicator run.
    IndicatorEnd = 2509, SCI_INDICATOREND;
    /// Set whether an indicator draws under text.
    IndicSetUnder = 2510, SCI_INDICSETUNDER;
    /// Whether an indicator draws under text.
    IndicGetUnder = 2511, SCI_INDICGETUNDER;
    /// Set an indicator's fill alpha.
    IndicSetAlpha = 2523, SCI_INDICSETALPHA;
    /// An indicator's fill alpha.
    IndicGetAlpha = 2524, SCI_INDICGETALPHA;
    /// Set a line's margin text.
    MarginSetText = 2530, SCI_MARGINSETTEXT;
    /// A line's margin text.
    MarginGetText = 2531, SCI_MARGINGETTEXT;
    /// Set a line's margin style.
    MarginSetStyle = 2532, SCI_MARGINSETSTYLE;
    /// A line's margin style.
    MarginGetStyle = 2533, SCI_MARGINGETSTYLE;
    /// Set a line's per-character margin styles.
    MarginSetStyles = 2534, SCI_MARGINSETSTYLES;
    /// A line's per-character margin styles.
    MarginGetStyles = 2535, SCI_MARGINGETSTYLES;
    /// Remove all margin text.
    MarginTextClearAll = 2536, SCI_MARGINTEXTCLEARALL;
    /// Set the margin style offset.
    MarginSetStyleOffset = 2537, SCI_MARGINSETSTYLEOFFSET;
    /// Margin style offset.
    MarginGetStyleOffset = 2538, SCI_MARGINGETSTYLEOFFSET;
    /// Set a line's annotation.
    AnnotationSetText = 2540, SCI_ANNOTATIONSETTEXT;
    /// A line's annotation.
    AnnotationGetText = 2541, SCI_ANNOTATIONGETTEXT;
    /// Set a line's annotation style.
    AnnotationSetStyle = 2542, SCI_ANNOTATIONSETSTYLE;
    /// A line's annotation style.
    AnnotationGetStyle = 2543, SCI_ANNOTATIONGETSTYLE;
    /// Set a line's per-character annotation styles.
    AnnotationSetStyles = 2544, SCI_ANNOTATIONSETSTYLES;
    /// A line's per-character annotation styles.
    AnnotationGetStyles = 2545, SCI_ANNOTATIONGETSTYLES;
    /// Display lines of a line's annotation.
    AnnotationGetLines = 2546, SCI_ANNOTATIONGETLINES;
    /// Remove every annotation.
    AnnotationClearAll = 2547, SCI_ANNOTATIONCLEARALL;
    /// Set how annotations are shown.
    AnnotationSetVisible = 2548, SCI_ANNOTATIONSETVISIBLE;
    /// How annotations are shown.
    AnnotationGetVisible = 2549, SCI_ANNOTATIONGETVISIBLE;
    /// Set the annotation style offset.
    AnnotationSetStyleOffset = 2550, SCI_ANNOTATIONSETSTYLEOFFSET;
    /// Annotation style offset.
    AnnotationGetStyleOffset = 2551, SCI_ANNOTATIONGETSTYLEOFFSET;
    /// Collapse to a single caret without scrolling.
    SetEmptySelection = 2556, SCI_SETEMPTYSELECTION;
    /// Set an indicator's outline alpha.
    IndicSetOutlineAlpha = 2558, SCI_INDICSETOUTLINEALPHA;
    /// An indicator's outline alpha.
    IndicGetOutlineAlpha = 2559, SCI_INDICGETOUTLINEALPHA;
    /// Record a host undo action.
    AddUndoAction = 2560, SCI_ADDUNDOACTION;
    /// Allow more than one selection.
    SetMultipleSelection = 2563, SCI_SETMULTIPLESELECTION;
    /// Whether more than one selection is allowed.
    GetMultipleSelection = 2564, SCI_GETMULTIPLESELECTION;
    /// Send typing to every selection.
    SetAdditionalSelectionTyping = 2565, SCI_SETADDITIONALSELECTIONTYPING;
    /// Whether typing goes to every selection.
    GetAdditionalSelectionTyping = 2566, SCI_GETADDITIONALSELECTIONTYPING;
    /// Number of selections.
    GetSelections = 2570, SCI_GETSELECTIONS;
    /// Reset to a single caret at 0.
    ClearSelections = 2571, SCI_CLEARSELECTIONS;
    /// Replace all selections with one.
    SetSelection = 2572, SCI_SETSELECTION;
    /// Add a selection and make it main.
    AddSelection = 2573, SCI_ADDSELECTION;
    /// Set the main selection.
    SetMainSelection = 2574, SCI_SETMAINSELECTION;
    /// Index of the main selection.
    GetMainSelection = 2575, SCI_GETMAINSELECTION;
    /// Set a selection's caret.
    SetSelectionNCaret = 2576, SCI_SETSELECTIONNCARET;
    /// A selection's caret.
    GetSelectionNCaret = 2577, SCI_GETSELECTIONNCARET;
    /// Set a selection's anchor.
    SetSelectionNAnchor = 2578, SCI_SETSELECTIONNANCHOR;
    /// A selection's anchor.
    GetSelectionNAnchor = 2579, SCI_GETSELECTIONNANCHOR;
    /// Set a selection's caret virtual space.
    SetSelectionNCaretVirtualSpace = 2580, SCI_SETSELECTIONNCARETVIRTUALSPACE;
    /// A selection's caret virtual space.
    GetSelectionNCaretVirtualSpace = 2581, SCI_GETSELECTIONNCARETVIRTUALSPACE;
    /// Set a selection's anchor virtual space.
    SetSelectionNAnchorVirtualSpace = 2582, SCI_SETSELECTIONNANCHORVIRTUALSPACE;
    /// A selection's anchor virtual space.
    GetSelectionNAnchorVirtualSpace = 2583, SCI_GETSELECTIONNANCHORVIRTUALSPACE;
    /// Set a selection's start.
    SetSelectionNStart = 2584, SCI_SETSELECTIONNSTART;
    /// A selection's start.
    GetSelectionNStart = 2585, SCI_GETSELECTIONNSTART;
    /// Set a selection's end.
    SetSelectionNEnd = 2586, SCI_SETSELECTIONNEND;
    /// A selection's end.
    GetSelectionNEnd = 2587, SCI_GETSELECTIONNEND;
    /// Set the rectangle's caret.
    SetRectangularSelectionCaret = 2588, SCI_SETRECTANGULARSELECTIONCARET;
    /// The rectangle's caret.
    GetRectangularSelectionCaret = 2589, SCI_GETRECTANGULARSELECTIONCARET;
    /// Set the rectangle's anchor.
    SetRectangularSelectionAnchor = 2590, SCI_SETRECTANGULARSELECTIONANCHOR;
    /// The rectangle's anchor.
    GetRectangularSelectionAnchor = 2591, SCI_GETRECTANGULARSELECTIONANCHOR;
    /// Set the rectangle's caret virtual space.
    SetRectangularSelectionCaretVirtualSpace = 2592, SCI_SETRECTANGULARSELECTIONCARETVIRTUALSPACE;
    /// The rectangle's caret virtual space.
    GetRectangularSelectionCaretVirtualSpace = 2593, SCI_GETRECTANGULARSELECTIONCARETVIRTUALSPACE;
    /// Set the rectangle's anchor virtual space.
    SetRectangularSelectionAnchorVirtualSpace = 2594, SCI_SETRECTANGULARSELECTIONANCHORVIRTUALSPACE;
    /// The rectangle's anchor virtual space.
    GetRectangularSelectionAnchorVirtualSpace = 2595, SCI_GETRECTANGULARSELECTIONANCHORVIRTUALSPACE;
    /// Set virtual space options.
    SetVirtualSpaceOptions = 2596, SCI_SETVIRTUALSPACEOPTIONS;
    /// Virtual space options.
    GetVirtualSpaceOptions = 2597, SCI_GETVIRTUALSPACEOPTIONS;
    /// Make the next selection main.
    RotateSelection = 2606, SCI_ROTATESELECTION;
    /// Swap caret and anchor of the main selection.
    SwapMainAnchorCaret = 2607, SCI_SWAPMAINANCHORCARET;
    /// Next contracted header.
    ContractedFoldNext = 2618, SCI_CONTRACTEDFOLDNEXT;
    /// Characters between two positions.
    CountCharacters = 2633, SCI_COUNTCHARACTERS;
    /// Delete a range.
    DeleteRange = 2645, SCI_DELETERANGE;
    /// Word characters.
    GetWordChars = 2646, SCI_GETWORDCHARS;
    /// Whitespace characters.
    GetWhitespaceChars = 2647, SCI_GETWHITESPACECHARS;
    /// Set the punctuation characters.
    SetPunctuationChars = 2648, SCI_SETPUNCTUATIONCHARS;
    /// Punctuation characters.
    GetPunctuationChars = 2649, SCI_GETPUNCTUATIONCHARS;
    /// Whether every selection is empty.
    GetSelectionEmpty = 2650, SCI_GETSELECTIONEMPTY;
    /// Apply a fold action to every fold.
    FoldAll = 2662, SCI_FOLDALL;
    /// Set automatic fold behaviour.
    SetAutomaticFold = 2663, SCI_SETAUTOMATICFOLD;
    /// Automatic fold behaviour.
    GetAutomaticFold = 2664, SCI_GETAUTOMATICFOLD;
    /// Set the target.
    SetTargetRange = 2686, SCI_SETTARGETRANGE;
    /// Text of the target.
    GetTargetText = 2687, SCI_GETTARGETTEXT;
    /// Set the target to the whole document.
    TargetWholeDocument = 2690, SCI_TARGETWHOLEDOCUMENT;
    /// Set the idle styling mode.
    SetIdleStyling = 2692, SCI_SETIDLESTYLING;
    /// Idle styling mode.
    GetIdleStyling = 2693, SCI_GETIDLESTYLING;
    /// Start reporting dispatched messages.
    StartRecord = 3001, SCI_STARTRECORD;
    /// Stop reporting dispatched messages.
    StopRecord = 3002, SCI_STOPRECORD;
    /// Style a range now.
    Colourise = 4003, SCI_COLOURISE;
}

/// `SCI_*` name of a raw code.
pub fn message_name(code: u32) -> Option<&'static str> {
    Message::from_code(code).map(Message::name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_and_names_are_unique() {
        let codes: HashSet<u32> = CATALOGUE.iter().map(|(code, _)| *code).collect();
        let names: HashSet<&str> = CATALOGUE.iter().map(|(_, name)| *name).collect();
        assert_eq!(codes.len(), CATALOGUE.len());
        assert_eq!(names.len(), CATALOGUE.len());
    }

    #[test]
    fn test_catalogue_is_sorted() {
        assert!(CATALOGUE.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_decode_round_trip() {
        for (code, name) in CATALOGUE {
            let message = Message::from_code(*code).unwrap();
            assert_eq!(message.code(), *code);
            assert_eq!(message.name(), *name);
        }
        assert_eq!(Message::from_code(SCI_SETTEXT), Some(Message::SetText));
        assert_eq!(message_name(2197), Some("SCI_SEARCHINTARGET"));
        assert_eq!(Message::from_code(1), None);
    }
}
