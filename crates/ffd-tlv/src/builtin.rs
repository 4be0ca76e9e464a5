//! Builtin descriptor table for the FFD tag space.
//!
//! Entries are sorted ascending by tag id; `registry::search_sorted` depends
//! on that order. Descriptors mirror the published field definitions:
//! kind, declared byte length, and whether the length is variable.

use crate::registry::{DataKind, Tag, TagDesc};

const fn desc(kind: DataKind, tag: u16, length: u16, varlen: bool) -> TagDesc {
    TagDesc {
        kind,
        tag: Tag(tag),
        length,
        varlen,
    }
}

use DataKind::{Bool, Bytes, Fvln, Stlv, String, Time, Uint, Vln};

pub(crate) static BUILTIN_TAGS: &[TagDesc] = &[
    desc(Bool, 1001, 1, false),    // automatic mode
    desc(Bool, 1002, 1, false),    // autonomous (offline) mode
    desc(String, 1005, 256, true), // transfer operator address
    desc(String, 1008, 64, true),  // buyer phone or email
    desc(String, 1009, 256, true), // settlement address
    desc(Time, 1012, 4, false),    // date-time
    desc(String, 1013, 20, false), // machine serial number
    desc(String, 1016, 12, false), // transfer operator INN
    desc(String, 1017, 12, false), // OFD INN
    desc(String, 1018, 12, false), // user INN
    desc(Vln, 1020, 6, false),     // settlement total
    desc(String, 1021, 64, true),  // cashier
    desc(Uint, 1022, 1, false),    // OFD response code
    desc(Fvln, 1023, 8, true),     // quantity
    desc(String, 1026, 64, true),  // transfer operator name
    desc(String, 1030, 128, true), // item name
    desc(Vln, 1031, 6, false),     // cash payment sum
    desc(String, 1036, 21, true),  // vending machine number
    desc(String, 1037, 20, false), // registration number
    desc(Uint, 1038, 4, false),    // shift number
    desc(Uint, 1040, 4, false),    // fiscal document number
    desc(String, 1041, 16, false), // fiscal storage number
    desc(Uint, 1042, 4, false),    // check number within shift
    desc(Vln, 1043, 6, false),     // item total
    desc(String, 1044, 24, true),  // payment agent operation
    desc(String, 1046, 256, true), // OFD name
    desc(String, 1048, 256, true), // user name
    desc(Bool, 1050, 1, false),    // fiscal storage resource exhausted
    desc(Bool, 1051, 1, false),    // fiscal storage replacement required
    desc(Bool, 1052, 1, false),    // fiscal storage memory full
    desc(Bool, 1053, 1, false),    // OFD response timeout exceeded
    desc(Uint, 1054, 1, false),    // settlement sign
    desc(Uint, 1055, 1, false),    // applied taxation system
    desc(Bool, 1056, 1, false),    // encryption sign
    desc(Uint, 1057, 1, false),    // agent flags
    desc(Stlv, 1059, 1024, true),  // settlement item
    desc(String, 1060, 256, true), // tax authority site
    desc(Uint, 1062, 1, false),    // taxation systems
    desc(Stlv, 1068, 1024, true),  // operator message
    desc(String, 1073, 19, true),  // payment agent phone
    desc(String, 1074, 19, true),  // payment operator phone
    desc(String, 1075, 19, true),  // transfer operator phone
    desc(Bytes, 1077, 6, false),   // fiscal sign of the document
    desc(Bytes, 1078, 16, true),   // operator fiscal sign
    desc(Vln, 1079, 6, false),     // item unit price
    desc(Vln, 1081, 6, false),     // electronic payment sum
    desc(Stlv, 1084, 1024, true),  // additional user attribute
    desc(String, 1085, 64, true),  // additional user attribute name
    desc(String, 1086, 256, true), // additional user attribute value
    desc(Vln, 1097, 4, false),     // count of untransmitted documents
    desc(Time, 1098, 4, false),    // date of first untransmitted document
    desc(Uint, 1101, 1, false),    // re-registration reason code
    desc(Vln, 1102, 6, false),     // VAT 20% sum
    desc(Vln, 1103, 6, false),     // VAT 10% sum
    desc(Vln, 1104, 6, false),     // VAT 0% sum
    desc(Vln, 1105, 6, false),     // no-VAT sum
    desc(Vln, 1106, 6, false),     // VAT 20/120 sum
    desc(Vln, 1107, 6, false),     // VAT 10/110 sum
    desc(Bool, 1108, 1, false),    // internet-only sign
    desc(Bool, 1109, 1, false),    // service settlement sign
    desc(Bool, 1110, 1, false),    // BSO sign
    desc(Vln, 1111, 4, false),     // total document count
    desc(Vln, 1116, 4, false),     // number of first untransmitted document
    desc(String, 1117, 64, true),  // sender email
    desc(Vln, 1118, 4, false),     // check count within shift
    desc(Bool, 1126, 1, false),    // lottery sign
    desc(Stlv, 1157, 1024, true),  // fiscal storage counters
    desc(Stlv, 1158, 1024, true),  // untransmitted document counters
    desc(Bytes, 1162, 32, true),   // product code
    desc(String, 1171, 19, true),  // supplier phone
    desc(Uint, 1173, 1, false),    // correction type
    desc(Stlv, 1174, 1024, true),  // correction basis
    desc(String, 1177, 256, true), // correction basis name
    desc(Time, 1178, 4, false),    // correction basis document date
    desc(String, 1179, 32, true),  // correction basis document number
    desc(String, 1187, 256, true), // settlement place
    desc(String, 1188, 8, true),   // machine firmware version
    desc(Uint, 1189, 1, false),    // machine format version
    desc(Uint, 1190, 1, false),    // fiscal storage format version
    desc(String, 1191, 64, true),  // additional item attribute
    desc(String, 1192, 16, true),  // additional check attribute
    desc(Bool, 1193, 1, false),    // gambling sign
    desc(String, 1196, 256, true), // check QR code
    desc(Uint, 1199, 1, false),    // VAT rate
    desc(Vln, 1200, 6, false),     // item VAT sum
    desc(String, 1203, 12, false), // cashier INN
    desc(Bool, 1207, 1, false),    // excise goods sign
    desc(Uint, 1209, 1, false),    // format version
    desc(Uint, 1212, 1, false),    // item type sign
    desc(Uint, 1213, 2, false),    // fiscal storage validity days
    desc(Uint, 1214, 1, false),    // payment method sign
    desc(Vln, 1215, 6, false),     // prepayment sum
    desc(Vln, 1216, 6, false),     // postpayment sum
    desc(Vln, 1217, 6, false),     // counter-provision sum
    desc(Bool, 1221, 1, false),    // printer-in-machine sign
    desc(Uint, 1222, 1, false),    // agent sign per item
    desc(Stlv, 1223, 1024, true),  // agent data
    desc(Stlv, 1224, 1024, true),  // supplier data
    desc(String, 1225, 256, true), // supplier name
    desc(String, 1226, 12, false), // supplier INN
    desc(String, 1227, 256, true), // buyer name
    desc(String, 1228, 12, false), // buyer INN
    desc(Vln, 1229, 6, false),     // excise sum
    desc(String, 1230, 3, false),  // country of origin code
    desc(String, 1231, 32, true),  // customs declaration number
];
