//! Feature names, signal values and tagged evaluator results.

use serde::{Serialize, Serializer};
use std::fmt;

/// Value of one heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Legitimate,
    Suspicious,
    Phishing,
}

impl Signal {
    /// Integer form consumed by the model: 1, 0 or -1.
    pub fn value(self) -> i8 {
        match self {
            Signal::Legitimate => 1,
            Signal::Suspicious => 0,
            Signal::Phishing => -1,
        }
    }

    /// `Phishing` when `cond` holds, otherwise `Legitimate`.
    pub fn phishing_if(cond: bool) -> Self {
        if cond {
            Signal::Phishing
        } else {
            Signal::Legitimate
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Signal {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i8(self.value())
    }
}

/// Result of one evaluator: computed from real data, or the declared fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Computed(Signal),
    Fallback(Signal),
}

impl Evaluation {
    pub fn signal(self) -> Signal {
        match self {
            Evaluation::Computed(s) | Evaluation::Fallback(s) => s,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Evaluation::Fallback(_))
    }
}

macro_rules! features {
    ($( $variant:ident => $name:literal, fallback: $fallback:ident; )*) => {
        /// The 30 features, declared in the column order the trained model expects.
        ///
        /// `Ord` follows declaration order, so ordered maps keyed by `Feature`
        /// iterate in model order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Feature {
            $( $variant, )*
        }

        impl Feature {
            pub const ALL: &'static [Feature] = &[ $( Feature::$variant, )* ];

            /// Column name as the model was trained with it (original spellings kept).
            pub fn name(self) -> &'static str {
                match self {
                    $( Feature::$variant => $name, )*
                }
            }

            /// Value substituted when the data behind this feature is unavailable.
            pub fn fallback(self) -> Signal {
                match self {
                    $( Feature::$variant => Signal::$fallback, )*
                }
            }
        }
    };
}

// Fallbacks for the lexical features are never used (those evaluators are
// total) but keep the table complete.
features! {
    HavingIpAddress => "having_IP_Address", fallback: Legitimate;
    UrlLength => "URL_Length", fallback: Legitimate;
    ShorteningService => "Shortining_Service", fallback: Legitimate;
    HavingAtSymbol => "having_At_Symbol", fallback: Legitimate;
    DoubleSlashRedirecting => "double_slash_redirecting", fallback: Legitimate;
    PrefixSuffix => "Prefix_Suffix", fallback: Legitimate;
    HavingSubDomain => "having_Sub_Domain", fallback: Legitimate;
    SslFinalState => "SSLfinal_State", fallback: Phishing;
    DomainRegistrationLength => "Domain_registeration_length", fallback: Phishing;
    Favicon => "Favicon", fallback: Legitimate;
    Port => "port", fallback: Legitimate;
    HttpsToken => "HTTPS_token", fallback: Legitimate;
    RequestUrl => "Request_URL", fallback: Legitimate;
    UrlOfAnchor => "URL_of_Anchor", fallback: Legitimate;
    LinksInTags => "Links_in_tags", fallback: Legitimate;
    ServerFormHandler => "SFH", fallback: Legitimate;
    SubmittingToEmail => "Submitting_to_email", fallback: Legitimate;
    AbnormalUrl => "Abnormal_URL", fallback: Phishing;
    Redirect => "Redirect", fallback: Suspicious;
    OnMouseover => "on_mouseover", fallback: Legitimate;
    RightClick => "RightClick", fallback: Legitimate;
    PopupWindow => "popUpWidnow", fallback: Legitimate;
    Iframe => "Iframe", fallback: Legitimate;
    AgeOfDomain => "age_of_domain", fallback: Phishing;
    DnsRecord => "DNSRecord", fallback: Phishing;
    WebTraffic => "web_traffic", fallback: Suspicious;
    PageRank => "Page_Rank", fallback: Suspicious;
    GoogleIndex => "Google_Index", fallback: Legitimate;
    LinksPointingToPage => "Links_pointing_to_page", fallback: Suspicious;
    StatisticalReport => "Statistical_report", fallback: Suspicious;
}

impl Feature {
    /// Evaluation carrying this feature's declared fallback.
    pub fn fell_back(self) -> Evaluation {
        Evaluation::Fallback(self.fallback())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
