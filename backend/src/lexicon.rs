use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use lazy_static::lazy_static;

use crate::types::{Result, TextosError};

lazy_static! {
    /// English stopwords, lowercase.
    pub static ref ENGLISH_STOPS: HashSet<&'static str> = [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
        "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
        "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
        "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
        "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
        "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
        "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
        "between", "into", "through", "during", "before", "after", "above", "below",
        "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
        "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
        "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
        "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t",
        "can", "will", "just", "don", "don't", "should", "should've", "now", "d", "ll",
        "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
        "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
        "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
        "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn",
        "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't", "i'm", "i've",
        "i'll", "i'd", "he's", "he'd", "he'll", "we're", "we've", "we'll", "they're",
        "they've", "they'll", "there's", "let's", "would", "could", "also",
    ].into_iter().collect();

    /// Words a reader is assumed to know, uppercase.
    pub static ref KNOWN_VOCABULARY: HashSet<&'static str> = [
        "ABLE", "ACCEPT", "ACROSS", "ACT", "ADD", "AGE", "AGO", "AGREE", "AIR", "ALLOW",
        "ALMOST", "ALONE", "ALONG", "ALREADY", "ALWAYS", "ANIMAL", "ANOTHER", "ANSWER",
        "ANYONE", "ANYTHING", "AREA", "ARM", "ARMY", "AROUND", "ARRIVE", "ART", "ASK",
        "AWAY", "BABY", "BACK", "BAD", "BALL", "BANK", "BAR", "BASE", "BEAUTIFUL",
        "BECOME", "BED", "BEGIN", "BEHIND", "BELIEVE", "BEST", "BETTER", "BIG", "BILL",
        "BIT", "BLACK", "BLOOD", "BLUE", "BOARD", "BODY", "BOOK", "BORN", "BOX", "BOY",
        "BREAK", "BRING", "BROTHER", "BUILD", "BUSINESS", "BUY", "CALL", "CAME", "CAR",
        "CARE", "CARRY", "CASE", "CATCH", "CAUSE", "CENTER", "CENTRE", "CERTAIN",
        "CHANCE", "CHANGE", "CHILD", "CHILDREN", "CHOOSE", "CITY", "CLASS", "CLEAR",
        "CLOSE", "COLD", "COLOUR", "COLOR", "COME", "COMPANY", "COUNTRY", "COURSE",
        "COVER", "CUT", "DARK", "DAUGHTER", "DAY", "DAYS", "DEAD", "DEAL", "DEATH",
        "DECIDE", "DEEP", "DIE", "DIFFERENT", "DINNER", "DOCTOR", "DOG", "DOOR", "DREAM",
        "DRINK", "DRIVE", "EACH", "EARLY", "EARTH", "EASY", "EAT", "ELSE", "END",
        "ENOUGH", "EVEN", "EVENING", "EVER", "EVERY", "EVERYONE", "EVERYTHING", "EYE",
        "EYES", "FACE", "FACT", "FALL", "FAMILY", "FAR", "FAST", "FATHER", "FEEL",
        "FELT", "FIELD", "FIGHT", "FILL", "FIND", "FINE", "FIRE", "FIRST", "FISH",
        "FLOOR", "FLY", "FOLLOW", "FOOD", "FOOT", "FORM", "FOUND", "FREE", "FRIEND",
        "FRONT", "FULL", "FUTURE", "GAME", "GAVE", "GET", "GIRL", "GIVE", "GLASS", "GO",
        "GOD", "GOES", "GONE", "GOOD", "GOT", "GREAT", "GREEN", "GROUND", "GROUP",
        "GROW", "GUN", "HAIR", "HALF", "HAND", "HANDS", "HAPPEN", "HAPPY", "HARD",
        "HEAD", "HEAR", "HEARD", "HEART", "HEAVY", "HELP", "HIGH", "HILL", "HISTORY",
        "HIT", "HOLD", "HOME", "HOPE", "HORSE", "HOT", "HOUR", "HOURS", "HOUSE", "HUGE",
        "HUMAN", "IDEA", "IMPORTANT", "INSIDE", "INTEREST", "ISSUE", "JOB", "JOIN",
        "JUST", "KEEP", "KEPT", "KID", "KILL", "KIND", "KNEW", "KNOW", "KNOWN", "LAND",
        "LANGUAGE", "LARGE", "LAST", "LATE", "LATER", "LAUGH", "LAW", "LEAD", "LEARN",
        "LEAST", "LEAVE", "LEFT", "LEG", "LESS", "LET", "LETTER", "LIE", "LIFE",
        "LIGHT", "LIKE", "LINE", "LIST", "LISTEN", "LITTLE", "LIVE", "LONG", "LOOK",
        "LOSE", "LOST", "LOT", "LOVE", "LOW", "MADE", "MAKE", "MAN", "MANY", "MARKET",
        "MATTER", "MAY", "MAYBE", "MEAN", "MEET", "MEN", "MIGHT", "MIND", "MINUTE",
        "MISS", "MOMENT", "MONEY", "MONTH", "MORNING", "MOTHER", "MOVE", "MUCH", "MUSIC",
        "MUST", "NAME", "NEAR", "NEED", "NEVER", "NEW", "NEWS", "NEXT", "NICE", "NIGHT",
        "NONE", "NOTHING", "NUMBER", "OFTEN", "OLD", "ONE", "OPEN", "ORDER", "OTHERS",
        "PAGE", "PAPER", "PARENT", "PART", "PARTY", "PASS", "PAST", "PAY", "PEOPLE",
        "PERHAPS", "PERSON", "PICTURE", "PIECE", "PLACE", "PLAN", "PLAY", "POINT",
        "POLICE", "POOR", "POWER", "PRESENT", "PRICE", "PROBLEM", "PULL", "PUSH", "PUT",
        "QUESTION", "QUICK", "QUIET", "QUITE", "RAIN", "RAN", "RATHER", "REACH", "READ",
        "READY", "REAL", "REALLY", "REASON", "RED", "REMEMBER", "REST", "RICH", "RIGHT",
        "RIVER", "ROAD", "ROOM", "ROSE", "RULE", "RUN", "SAD", "SAFE", "SAID", "SAT",
        "SAW", "SAY", "SCHOOL", "SEA", "SECOND", "SEE", "SEEM", "SEEN", "SELL", "SEND",
        "SET", "SEVERAL", "SHALL", "SHIP", "SHORT", "SHOW", "SIDE", "SIMPLE", "SINCE",
        "SING", "SISTER", "SIT", "SLEEP", "SMALL", "SOMEONE", "SOMETHING", "SON", "SONG",
        "SOON", "SORRY", "SOUND", "SPEAK", "STAND", "START", "STATE", "STAY", "STILL",
        "STOP", "STORY", "STREET", "STRONG", "STUDENT", "STUDY", "SUN", "SURE", "TABLE",
        "TAKE", "TALK", "TEACHER", "TELL", "TEN", "TERM", "TEST", "THING", "THINGS",
        "THINK", "THOUGHT", "THREE", "THROUGH", "TIME", "TODAY", "TOGETHER", "TOLD",
        "TOOK", "TOP", "TOWN", "TREE", "TRUE", "TRY", "TURN", "TWO", "UNDERSTAND", "USE",
        "USED", "USUALLY", "VOICE", "WAIT", "WALK", "WALL", "WANT", "WAR", "WATCH",
        "WATER", "WAY", "WEEK", "WELL", "WENT", "WHITE", "WHOLE", "WIFE", "WIN",
        "WINDOW", "WITHOUT", "WOMAN", "WOMEN", "WORD", "WORDS", "WORK", "WORLD", "WRITE",
        "WRONG", "YEAR", "YEARS", "YES", "YET", "YOUNG",
    ].into_iter().collect();
}

/// Reference word lists used by the analyzer.
///
/// Stopwords are held lowercase and matched case-insensitively. Known
/// vocabulary is held uppercase, like the tokens it is compared with.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    stopwords: HashSet<String>,
    known_vocabulary: HashSet<String>,
}

impl Lexicon {
    pub fn new<I, J, S, T>(stopwords: I, known_vocabulary: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Lexicon {
            stopwords: stopwords.into_iter().map(|w| w.as_ref().trim().to_lowercase()).collect(),
            known_vocabulary: known_vocabulary.into_iter().map(|w| w.as_ref().trim().to_uppercase()).collect(),
        }
    }

    /// The built-in English lists.
    pub fn english() -> Self {
        Lexicon::new(ENGLISH_STOPS.iter(), KNOWN_VOCABULARY.iter())
    }

    /// Load the lists from newline-delimited word files. A missing path falls
    /// back to the built-in list.
    pub fn from_files(stopwords_path: Option<&Path>, vocabulary_path: Option<&Path>) -> Result<Self> {
        let english = Lexicon::english();

        let stopwords = match stopwords_path {
            Some(p) => read_word_list(p)?.iter().map(|w| w.to_lowercase()).collect(),
            None => english.stopwords,
        };

        let known_vocabulary = match vocabulary_path {
            Some(p) => read_word_list(p)?.iter().map(|w| w.to_uppercase()).collect(),
            None => english.known_vocabulary,
        };

        Ok(Lexicon { stopwords, known_vocabulary })
    }

    /// Add words to the known vocabulary, so they no longer count as
    /// unfamiliar. Returns how many were new.
    pub fn add_known<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .filter(|w| self.known_vocabulary.insert(w.clone()))
            .count()
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.known_vocabulary.contains(&word.to_uppercase())
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    pub fn known_vocabulary_count(&self) -> usize {
        self.known_vocabulary.len()
    }
}

/// One word per line, blank lines and `#` comments ignored.
pub fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| TextosError::UnreadableSource {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.to_string())
        .collect())
}

/// Append words to a word list file, uppercased, skipping those already
/// listed. The file is created if it doesn't exist. Returns how many lines
/// were written.
pub fn append_word_list<I, S>(path: &Path, words: I) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut listed: HashSet<String> = if path.exists() {
        read_word_list(path)?.iter().map(|w| w.to_uppercase()).collect()
    } else {
        HashSet::new()
    };

    let new_words: Vec<String> = words
        .into_iter()
        .map(|w| w.as_ref().trim().to_uppercase())
        .filter(|w| !w.is_empty() && !w.starts_with('#'))
        .filter(|w| listed.insert(w.clone()))
        .collect();

    if new_words.is_empty() {
        return Ok(0);
    }

    let write_failed = |e| TextosError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_failed)?;
        }
    }

    // A file not ending in a newline would join its last word with ours.
    let needs_newline = fs::read(path)
        .map(|b| b.last().is_some_and(|c| *c != b'\n'))
        .unwrap_or(false);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_failed)?;

    let mut content = String::new();
    if needs_newline {
        content.push('\n');
    }
    for w in &new_words {
        content.push_str(w);
        content.push('\n');
    }
    file.write_all(content.as_bytes()).map_err(write_failed)?;

    Ok(new_words.len())
}
